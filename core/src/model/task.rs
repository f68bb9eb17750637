use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StateError, StateResult};
use crate::model::category::Category;

pub const MIN_EDIT_MINUTES: u32 = 2;
pub const MAX_EDIT_MINUTES: u32 = 120;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "l" | "low" | "baixa" => Ok(Priority::Low),
            "m" | "med" | "medium" | "media" | "média" => Ok(Priority::Medium),
            "h" | "high" | "alta" => Ok(Priority::High),
            "u" | "urgent" | "urgente" => Ok(Priority::Urgent),
            other => Err(anyhow!("Unknown priority: '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for GoalStatus {
    fn default() -> Self {
        GoalStatus::Pending
    }
}

/// A task produced by the classifier, waiting for the user to confirm it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassifiedTask {
    pub id: Uuid,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub estimated_duration_minutes: u32,
    pub order: usize,
}

/// A user edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEdit {
    pub description: Option<String>,
    pub duration_minutes: Option<u32>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.duration_minutes.is_none()
            && self.category.is_none()
            && self.priority.is_none()
    }

    pub fn validate(&self) -> StateResult<()> {
        if let Some(desc) = &self.description {
            if desc.trim().is_empty() {
                return Err(StateError::EmptyDescription);
            }
        }
        if let Some(minutes) = self.duration_minutes {
            if !(MIN_EDIT_MINUTES..=MAX_EDIT_MINUTES).contains(&minutes) {
                return Err(StateError::InvalidDuration {
                    got: minutes,
                    min: MIN_EDIT_MINUTES,
                    max: MAX_EDIT_MINUTES,
                });
            }
        }
        Ok(())
    }
}

impl ClassifiedTask {
    pub fn apply_edit(&mut self, edit: &TaskEdit) -> StateResult<()> {
        edit.validate()?;
        if let Some(desc) = &edit.description {
            self.description = desc.trim().to_string();
        }
        if let Some(minutes) = edit.duration_minutes {
            self.estimated_duration_minutes = minutes;
        }
        if let Some(category) = edit.category {
            self.category = category;
        }
        if let Some(priority) = edit.priority {
            self.priority = priority;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        id: Uuid,
        title: String,
        category: Category,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            category,
            priority,
            status: GoalStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MicroTask {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub description: String,
    pub duration_minutes: u32,
    pub order: usize,
    pub status: TaskStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_minutes: Option<u32>,
}

impl MicroTask {
    pub fn new(
        id: Uuid,
        goal_id: Uuid,
        description: String,
        duration_minutes: u32,
        order: usize,
    ) -> Self {
        Self {
            id,
            goal_id,
            description,
            duration_minutes,
            order,
            status: TaskStatus::default(),
            started_at: None,
            completed_at: None,
            actual_minutes: None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self.status, TaskStatus::Pending | TaskStatus::InProgress)
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> StateResult<()> {
        self.transition(TaskStatus::Pending, TaskStatus::InProgress)?;
        self.started_at = Some(now);
        Ok(())
    }

    pub fn complete(&mut self, now: DateTime<Utc>, actual_minutes: u32) -> StateResult<()> {
        self.transition(TaskStatus::InProgress, TaskStatus::Completed)?;
        self.completed_at = Some(now);
        self.actual_minutes = Some(actual_minutes);
        Ok(())
    }

    /// Sends an in-progress task back to the queue and forgets the elapsed time.
    pub fn redo(&mut self) -> StateResult<()> {
        self.transition(TaskStatus::InProgress, TaskStatus::Pending)?;
        self.started_at = None;
        Ok(())
    }

    fn transition(&mut self, expected: TaskStatus, to: TaskStatus) -> StateResult<()> {
        if self.status != expected {
            return Err(StateError::InvalidTransition {
                id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> MicroTask {
        MicroTask::new(Uuid::from_u128(1), Uuid::from_u128(2), "Open the notes".to_string(), 5, 1)
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let now = Utc::now();
        let mut task = sample_task();

        task.start(now).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.started_at, Some(now));

        task.complete(now, 4).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.actual_minutes, Some(4));
        assert_eq!(task.completed_at, Some(now));
    }

    #[test]
    fn test_redo_resets_start() {
        let mut task = sample_task();
        task.start(Utc::now()).unwrap();
        task.redo().unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.started_at.is_none());
    }

    #[test]
    fn test_invalid_transitions() {
        let now = Utc::now();
        let mut task = sample_task();

        // Pending cannot complete or redo directly
        assert!(task.complete(now, 1).is_err());
        assert!(task.redo().is_err());

        task.start(now).unwrap();
        assert!(task.start(now).is_err());
        task.complete(now, 1).unwrap();

        let err = task.complete(now, 1).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidTransition {
                id: task.id,
                from: TaskStatus::Completed,
                to: TaskStatus::Completed,
            }
        );
        assert!(task.redo().is_err());
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!("urgente".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("H".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("baixa".parse::<Priority>().unwrap(), Priority::Low);
        assert!("whenever".parse::<Priority>().is_err());
    }

    #[test]
    fn test_edit_validation() {
        let mut task = ClassifiedTask {
            id: Uuid::from_u128(7),
            description: "pay rent".to_string(),
            category: Category::Finance,
            priority: Priority::Medium,
            estimated_duration_minutes: 10,
            order: 1,
        };

        let too_long = TaskEdit { duration_minutes: Some(121), ..Default::default() };
        assert!(matches!(
            task.apply_edit(&too_long),
            Err(StateError::InvalidDuration { got: 121, .. })
        ));

        let too_short = TaskEdit { duration_minutes: Some(1), ..Default::default() };
        assert!(task.apply_edit(&too_short).is_err());

        let blank = TaskEdit { description: Some("   ".to_string()), ..Default::default() };
        assert_eq!(task.apply_edit(&blank), Err(StateError::EmptyDescription));

        let ok = TaskEdit {
            description: Some("  pay rent today ".to_string()),
            duration_minutes: Some(120),
            priority: Some(Priority::Urgent),
            ..Default::default()
        };
        task.apply_edit(&ok).unwrap();
        assert_eq!(task.description, "pay rent today");
        assert_eq!(task.estimated_duration_minutes, 120);
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.category, Category::Finance);
    }
}
