use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json;
use tracing::debug;

use crate::repository::traits::StateRepository;
use crate::state::AppState;

pub const DEFAULT_FILE_NAME: &str = "state.json";

#[derive(Clone)]
pub struct FileStateRepository {
    file_path: PathBuf,
}

impl FileStateRepository {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Could not create data directory {}", data_dir.display()))?;

        Ok(FileStateRepository {
            file_path: data_dir.join(DEFAULT_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl StateRepository for FileStateRepository {
    fn load(&self) -> Result<Option<AppState>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let state = serde_json::from_reader(reader)
            .with_context(|| format!("Corrupt state file {}", self.file_path.display()))?;
        Ok(Some(state))
    }

    // Write to a sibling temp file, then rename over the real one.
    fn save(&self, state: &AppState) -> Result<()> {
        let tmp_path = self.file_path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, state)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.file_path)?;
        debug!("saved state to {}", self.file_path.display());
        Ok(())
    }
}
