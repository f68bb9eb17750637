use std::cell::RefCell;

use anyhow::Result;

use crate::repository::traits::StateRepository;
use crate::state::AppState;

/// Keeps the last saved state in memory. Useful for embedding and tests.
#[derive(Default)]
pub struct InMemoryStateRepository {
    saved: RefCell<Option<AppState>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            saved: RefCell::new(Some(state)),
        }
    }
}

impl StateRepository for InMemoryStateRepository {
    fn load(&self) -> Result<Option<AppState>> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, state: &AppState) -> Result<()> {
        *self.saved.borrow_mut() = Some(state.clone());
        Ok(())
    }
}
