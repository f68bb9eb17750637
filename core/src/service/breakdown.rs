use serde::{Deserialize, Serialize};

use crate::model::category::Category;
use crate::model::task::Priority;
use crate::service::classifier::Classifier;

pub const EMERGENCY_MINUTES: u32 = 5;
const ADJUST_MIN_MINUTES: u32 = 2;
const ADJUST_MAX_MINUTES: u32 = 15;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StepTemplate {
    pub description: String,
    pub duration_minutes: u32,
    pub order: usize,
}

/// A goal split into template micro-steps, not yet stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub steps: Vec<StepTemplate>,
}

impl GoalDraft {
    pub fn total_minutes(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_minutes).sum()
    }
}

fn steps(items: &[(&str, u32)]) -> Vec<StepTemplate> {
    items
        .iter()
        .enumerate()
        .map(|(i, (description, minutes))| StepTemplate {
            description: description.to_string(),
            duration_minutes: *minutes,
            order: i + 1,
        })
        .collect()
}

/// Classifies the whole text as one goal and splits it into four small steps.
pub fn break_down(text: &str, classifier: &Classifier) -> GoalDraft {
    let title = text.trim().to_string();
    let classification = classifier.classify(&title);

    GoalDraft {
        steps: template_steps(&title),
        title,
        category: classification.category,
        priority: classification.priority,
    }
}

fn template_steps(text: &str) -> Vec<StepTemplate> {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["estudar", "aprender", "study", "learn"]) {
        return steps(&[
            ("Open the study material", 2),
            ("Read the first two paragraphs", 3),
            ("Write notes on what you understood", 5),
            ("Review your notes", 3),
        ]);
    }

    if has(&["limpar", "organizar", "clean", "organize", "tidy"]) {
        return steps(&[
            ("Grab the cleaning supplies", 2),
            ("Clean one small area", 5),
            ("Put away 5 objects", 3),
            ("Store the supplies", 2),
        ]);
    }

    if has(&["exercício", "exercicio", "academia", "exercise", "gym", "workout"]) {
        return steps(&[
            ("Put on workout clothes", 2),
            ("Stretch for 5 minutes", 5),
            ("Do 10 reps of one exercise", 3),
            ("Drink water and rest", 2),
        ]);
    }

    if has(&["trabalho", "projeto", "work", "project"]) {
        return steps(&[
            ("Open the document or project", 2),
            ("Review what is already done", 3),
            ("Do one small part", 5),
            ("Save and organize the files", 2),
        ]);
    }

    steps(&[
        ("Prepare your space", 2),
        ("Start the first stage", 3),
        ("Keep going with focus", 5),
        ("Wrap up and tidy", 3),
    ])
}

/// Five minutes of steps for when nothing else works.
pub fn emergency_steps() -> Vec<StepTemplate> {
    steps(&[
        ("Take three deep breaths", 1),
        ("Pick ONE thing to do right now", 1),
        ("Do only the first step of that thing", 3),
    ])
}

/// Nudges the next estimate towards how long the user actually took.
pub fn adjust_duration(actual_minutes: u32, estimated_minutes: u32) -> u32 {
    let difference = actual_minutes as i64 - estimated_minutes as i64;

    if difference > 2 {
        return (estimated_minutes + 2).min(ADJUST_MAX_MINUTES);
    }
    if difference < -1 {
        return estimated_minutes.saturating_sub(1).max(ADJUST_MIN_MINUTES);
    }
    estimated_minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_down_study_goal() {
        let classifier = Classifier::new().unwrap();
        let draft = break_down("  Estudar para a prova de matemática ", &classifier);

        assert_eq!(draft.title, "Estudar para a prova de matemática");
        assert_eq!(draft.category, Category::Study);
        assert_eq!(draft.steps.len(), 4);
        assert_eq!(draft.steps[0].description, "Open the study material");
        assert_eq!(draft.total_minutes(), 13);
        let orders: Vec<usize> = draft.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_break_down_generic_goal() {
        let classifier = Classifier::new().unwrap();
        let draft = break_down("write a poem", &classifier);
        assert_eq!(draft.category, Category::Work);
        assert_eq!(draft.steps[0].description, "Prepare your space");
    }

    #[test]
    fn test_emergency_is_five_minutes() {
        let steps = emergency_steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.iter().map(|s| s.duration_minutes).sum::<u32>(), EMERGENCY_MINUTES);
    }

    #[test]
    fn test_adjust_duration() {
        // took much longer
        assert_eq!(adjust_duration(8, 5), 7);
        assert_eq!(adjust_duration(30, 14), 15);
        // much faster
        assert_eq!(adjust_duration(1, 5), 4);
        assert_eq!(adjust_duration(0, 2), 2);
        // close enough
        assert_eq!(adjust_duration(7, 5), 5);
        assert_eq!(adjust_duration(4, 5), 5);
    }
}
