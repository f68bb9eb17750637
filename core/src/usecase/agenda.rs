use serde::{Deserialize, Serialize};

use crate::model::category::Category;
use crate::model::user::UserPreferences;

const FIRST_HOUR: u32 = 9;
const ENTRY_MINUTES: u32 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AgendaEntry {
    pub time: String,
    pub description: String,
    pub duration_minutes: u32,
    pub category: Category,
}

fn templates(category: Category) -> &'static [&'static str] {
    match category {
        Category::Work => &["Review emails", "Work on the main project", "Hold a quick meeting"],
        Category::Study => &["Read study material", "Do exercises", "Review notes"],
        Category::Household => &["Organize one area", "Do one chore", "Clean something quick"],
        Category::Health => &["Stretch", "Walk for 10 minutes", "Drink water"],
        Category::Finance => &["Review expenses", "Pay a bill", "Organize documents"],
        Category::Wellness => &["Meditate for 5 minutes", "Take a mindful break", "Relax"],
        Category::School => &[
            "Check assignments",
            "Prepare for the next class",
            "Practice for the exam",
        ],
    }
}

/// "Do it for me" mode: one five-minute slot per preferred category, an hour
/// apart from 09:00.
pub fn daily_agenda(prefs: &UserPreferences) -> Vec<AgendaEntry> {
    prefs
        .preferred_categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let options = templates(*category);
            AgendaEntry {
                time: format!("{}:00", FIRST_HOUR + i as u32),
                description: options[i % options.len()].to_string(),
                duration_minutes: ENTRY_MINUTES,
                category: *category,
            }
        })
        .collect()
}
