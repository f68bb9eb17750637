use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyProgress {
    pub day: NaiveDate,
    pub focused_minutes: u32,
    pub completed_tasks: u32,
    pub streak: u32,
}

impl DailyProgress {
    pub fn new(day: NaiveDate, streak: u32) -> Self {
        Self {
            day,
            focused_minutes: 0,
            completed_tasks: 0,
            streak,
        }
    }

    /// Counts one completed task. Totals stop at `u32::MAX`.
    pub fn add(&mut self, minutes: u32) {
        self.focused_minutes = self.focused_minutes.saturating_add(minutes);
        self.completed_tasks = self.completed_tasks.saturating_add(1);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstStep,
    Streak3,
    Streak7,
    Streak30,
    Tasks10,
    Tasks50,
    Tasks100,
    FocusHour,
    AllCategories,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 9] = [
        AchievementKind::FirstStep,
        AchievementKind::Streak3,
        AchievementKind::Streak7,
        AchievementKind::Streak30,
        AchievementKind::Tasks10,
        AchievementKind::Tasks50,
        AchievementKind::Tasks100,
        AchievementKind::FocusHour,
        AchievementKind::AllCategories,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AchievementKind::FirstStep => "First Step",
            AchievementKind::Streak3 => "Consistency",
            AchievementKind::Streak7 => "Strong Week",
            AchievementKind::Streak30 => "Master of Discipline",
            AchievementKind::Tasks10 => "Productive",
            AchievementKind::Tasks50 => "Unstoppable",
            AchievementKind::Tasks100 => "Centurion",
            AchievementKind::FocusHour => "Focus Hour",
            AchievementKind::AllCategories => "Balanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementKind::FirstStep => "Completed your first micro-task",
            AchievementKind::Streak3 => "3 days in a row",
            AchievementKind::Streak7 => "7 days in a row",
            AchievementKind::Streak30 => "30 days in a row",
            AchievementKind::Tasks10 => "10 micro-tasks completed",
            AchievementKind::Tasks50 => "50 micro-tasks completed",
            AchievementKind::Tasks100 => "100 micro-tasks completed",
            AchievementKind::FocusHour => "60 focused minutes in one day",
            AchievementKind::AllCategories => "Completed tasks in every category",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AchievementKind::FirstStep => "🎯",
            AchievementKind::Streak3 => "🔥",
            AchievementKind::Streak7 => "⭐",
            AchievementKind::Streak30 => "👑",
            AchievementKind::Tasks10 => "✅",
            AchievementKind::Tasks50 => "🚀",
            AchievementKind::Tasks100 => "💯",
            AchievementKind::FocusHour => "⏰",
            AchievementKind::AllCategories => "🌈",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub unlocked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut today = DailyProgress::new(NaiveDate::from_ymd_opt(2026, 5, 11).unwrap(), 2);
        today.add(7);
        today.add(13);
        assert_eq!(today.focused_minutes, 20);
        assert_eq!(today.completed_tasks, 2);
        assert_eq!(today.streak, 2);
    }

    #[test]
    fn test_add_saturates() {
        let mut today = DailyProgress::new(NaiveDate::from_ymd_opt(2026, 5, 11).unwrap(), 1);
        today.add(u32::MAX);
        today.add(1);
        assert_eq!(today.focused_minutes, u32::MAX);
        assert_eq!(today.completed_tasks, 2);

        today.completed_tasks = u32::MAX;
        today.add(0);
        assert_eq!(today.completed_tasks, u32::MAX);
    }
}
