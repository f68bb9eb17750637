use uuid::Uuid;

use crate::model::task::TaskStatus;

pub type StateResult<T> = std::result::Result<T, StateError>;

/// Errors raised by state transitions and user edits.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StateError {
    #[error("Micro-task with ID {0} not found")]
    TaskNotFound(Uuid),

    #[error("Goal with ID {0} not found")]
    GoalNotFound(Uuid),

    #[error("Cannot move task {id} from {from:?} to {to:?}")]
    InvalidTransition {
        id: Uuid,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("Duration must be between {min} and {max} minutes, got {got}")]
    InvalidDuration { got: u32, min: u32, max: u32 },

    #[error("Task description cannot be empty")]
    EmptyDescription,

    #[error("Invalid onboarding data: {0}")]
    InvalidOnboarding(String),

    #[error("Onboarding has not been completed yet")]
    NotOnboarded,
}
