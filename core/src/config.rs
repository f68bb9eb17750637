use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DATA_DIR_ENV: &str = "PROCRASTINAR_HOME";
const DEFAULT_DIR_NAME: &str = ".procrastinar";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Explicit directory first, then `$PROCRASTINAR_HOME`, then `~/.procrastinar`.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => {
                    let home_dir = dirs::home_dir()
                        .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                    home_dir.join(DEFAULT_DIR_NAME)
                }
            },
        };
        Ok(Self { data_dir })
    }
}
