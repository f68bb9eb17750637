use anyhow::{anyhow, Result};
use tracing::debug;

use crate::id::IdGenerator;
use crate::input::TaskExtractor;
use crate::model::task::{ClassifiedTask, TaskEdit};
use crate::model::user::UserPreferences;
use crate::service::breakdown::{self, GoalDraft};
use crate::service::classifier::Classifier;
use crate::service::ranker::rank_tasks;

/// Free text in, ranked task list out.
pub struct TaskPlanner {
    extractor: TaskExtractor,
    classifier: Classifier,
}

impl TaskPlanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: TaskExtractor::new()?,
            classifier: Classifier::new()?,
        })
    }

    /// An empty result means no tasks were identified; it is not an error.
    pub fn plan(
        &self,
        text: &str,
        prefs: &UserPreferences,
        ids: &impl IdGenerator,
    ) -> Vec<ClassifiedTask> {
        let fragments = self.extractor.extract(text);
        debug!("extracted {} fragments", fragments.len());

        let tasks = fragments
            .into_iter()
            .enumerate()
            .map(|(i, description)| {
                let c = self.classifier.classify(&description);
                ClassifiedTask {
                    id: ids.next_id(),
                    description,
                    category: c.category,
                    priority: c.priority,
                    estimated_duration_minutes: c.estimated_duration_minutes,
                    order: i + 1,
                }
            })
            .collect();

        rank_tasks(tasks, prefs)
    }

    pub fn break_down(&self, text: &str) -> GoalDraft {
        breakdown::break_down(text, &self.classifier)
    }
}

/// Changes the planned task at position `order` before the plan is
/// confirmed. The ranking is left alone.
pub fn edit_plan(tasks: &mut [ClassifiedTask], order: usize, edit: &TaskEdit) -> Result<()> {
    let task = tasks
        .iter_mut()
        .find(|t| t.order == order)
        .ok_or_else(|| anyhow!("No planned task number {}", order))?;
    task.apply_edit(edit)?;
    debug!("edited planned task {}", order);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;
    use crate::model::category::Category;
    use crate::error::StateError;
    use crate::model::task::Priority;

    #[test]
    fn test_plan_end_to_end() {
        let planner = TaskPlanner::new().unwrap();
        let prefs = UserPreferences::new(vec![Category::Finance, Category::Study], 30);
        let ids = SequentialIds::new();

        let text = "1. estudar matemática\n2. pagar conta urgente\n3. arrumar o quarto depois";
        let tasks = planner.plan(text, &prefs, &ids);

        let descriptions: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        // 220 (urgent + top category + short), 135 (medium + second), 55 (low + other)
        assert_eq!(
            descriptions,
            vec!["pagar conta urgente", "estudar matemática", "arrumar o quarto depois"]
        );

        assert_eq!(tasks[0].priority, Priority::Urgent);
        assert_eq!(tasks[2].category, Category::Household);
        assert_eq!(tasks[2].priority, Priority::Low);
        assert_eq!(tasks.iter().map(|t| t.order).collect::<Vec<_>>(), vec![1, 2, 3]);

        // ids follow extraction order, not rank
        assert_eq!(tasks[1].id.as_u128(), 1);
        assert_eq!(tasks[0].id.as_u128(), 2);
    }

    #[test]
    fn test_plan_nothing_identified() {
        let planner = TaskPlanner::new().unwrap();
        let tasks = planner.plan("ok", &UserPreferences::default(), &SequentialIds::new());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_plan_is_deterministic() {
        let planner = TaskPlanner::new().unwrap();
        let prefs = UserPreferences::new(vec![Category::Health], 20);
        let text = "go to the gym, pay rent and read a chapter";

        let a = planner.plan(text, &prefs, &SequentialIds::new());
        let b = planner.plan(text, &prefs, &SequentialIds::new());
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_edit_plan_before_confirming() {
        let planner = TaskPlanner::new().unwrap();
        let prefs = UserPreferences::new(vec![Category::Finance], 30);
        let text = "pagar conta urgente; estudar matemática";
        let mut tasks = planner.plan(text, &prefs, &SequentialIds::new());

        let edit = TaskEdit {
            description: Some("  estudar álgebra ".to_string()),
            duration_minutes: Some(40),
            priority: Some(Priority::High),
            ..Default::default()
        };
        edit_plan(&mut tasks, 2, &edit).unwrap();

        assert_eq!(tasks[1].description, "estudar álgebra");
        assert_eq!(tasks[1].estimated_duration_minutes, 40);
        assert_eq!(tasks[1].priority, Priority::High);
        assert_eq!(tasks[1].category, Category::Study);
        // no re-ranking
        assert_eq!(tasks[0].description, "pagar conta urgente");
        assert_eq!(tasks.iter().map(|t| t.order).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_edit_plan_rejects_bad_edits() {
        let planner = TaskPlanner::new().unwrap();
        let prefs = UserPreferences::default();
        let mut tasks = planner.plan("read a chapter", &prefs, &SequentialIds::new());
        let before = tasks.clone();

        let blank = TaskEdit { description: Some("   ".to_string()), ..Default::default() };
        let err = edit_plan(&mut tasks, 1, &blank).unwrap_err();
        assert_eq!(err.downcast_ref::<StateError>(), Some(&StateError::EmptyDescription));

        let err = edit_plan(&mut tasks, 7, &TaskEdit::default()).unwrap_err();
        assert_eq!(err.to_string(), "No planned task number 7");
        assert_eq!(tasks, before);
    }
}
