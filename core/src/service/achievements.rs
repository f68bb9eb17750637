use chrono::NaiveDate;

use crate::model::category::Category;
use crate::model::progress::AchievementKind;
use crate::state::AppState;

const FOCUS_HOUR_MINUTES: u32 = 60;

fn is_earned(kind: AchievementKind, state: &AppState, today: NaiveDate) -> bool {
    let completed = state.completed_count();
    match kind {
        AchievementKind::FirstStep => completed >= 1,
        AchievementKind::Streak3 => state.streak >= 3,
        AchievementKind::Streak7 => state.streak >= 7,
        AchievementKind::Streak30 => state.streak >= 30,
        AchievementKind::Tasks10 => completed >= 10,
        AchievementKind::Tasks50 => completed >= 50,
        AchievementKind::Tasks100 => completed >= 100,
        AchievementKind::FocusHour => state
            .progress_for(today)
            .map(|p| p.focused_minutes >= FOCUS_HOUR_MINUTES)
            .unwrap_or(false),
        AchievementKind::AllCategories => state.completed_categories().len() == Category::ALL.len(),
    }
}

/// Achievements the state qualifies for but has not recorded yet.
pub fn newly_unlocked(state: &AppState, today: NaiveDate) -> Vec<AchievementKind> {
    AchievementKind::ALL
        .into_iter()
        .filter(|kind| !state.has_achievement(*kind))
        .filter(|kind| is_earned(*kind, state, today))
        .collect()
}
