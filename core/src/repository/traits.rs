use anyhow::Result;

use crate::state::AppState;

/// Persistence boundary for the whole application state.
pub trait StateRepository {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<AppState>>;
    fn save(&self, state: &AppState) -> Result<()>;
}
