use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StateError, StateResult};
use crate::id::IdGenerator;
use crate::model::category::Category;
use crate::model::progress::{Achievement, AchievementKind, DailyProgress};
use crate::model::task::{
    ClassifiedTask, Goal, GoalStatus, MicroTask, Priority, TaskEdit, TaskStatus,
};
use crate::model::user::{OnboardingData, UserPreferences, UserProfile};
use crate::service::achievements;
use crate::service::breakdown::{adjust_duration, GoalDraft};
use crate::time::{days_between, Clock};

pub const STATE_VERSION: u32 = 1;

fn default_version() -> u32 {
    STATE_VERSION
}

/// Everything the application persists.
///
/// Mutations never touch `self`: each one returns the next state, so a caller
/// can drop the result when saving it fails.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub micro_tasks: Vec<MicroTask>,
    #[serde(default)]
    pub progress: Vec<DailyProgress>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_active_day: Option<NaiveDate>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            user: None,
            goals: Vec::new(),
            micro_tasks: Vec::new(),
            progress: Vec::new(),
            achievements: Vec::new(),
            streak: 0,
            last_active_day: None,
        }
    }
}

impl AppState {
    // Queries

    pub fn is_onboarded(&self) -> bool {
        self.user.is_some()
    }

    pub fn preferences(&self) -> UserPreferences {
        self.user
            .as_ref()
            .map(|u| u.preferences.clone())
            .unwrap_or_default()
    }

    pub fn goal(&self, id: &Uuid) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == *id)
    }

    pub fn micro_task(&self, id: &Uuid) -> Option<&MicroTask> {
        self.micro_tasks.iter().find(|t| t.id == *id)
    }

    pub fn tasks_for_goal<'a>(
        &'a self,
        goal_id: &'a Uuid,
    ) -> impl Iterator<Item = &'a MicroTask> + 'a {
        self.micro_tasks.iter().filter(move |t| t.goal_id == *goal_id)
    }

    pub fn in_progress_task(&self) -> Option<&MicroTask> {
        self.micro_tasks.iter().find(|t| t.status == TaskStatus::InProgress)
    }

    /// The task in progress, otherwise the pending task with the lowest
    /// `order`. Ties go to the task that was stored first.
    pub fn next_micro_task(&self) -> Option<&MicroTask> {
        self.in_progress_task().or_else(|| {
            self.micro_tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .min_by_key(|t| t.order)
        })
    }

    /// Highest `order` still waiting in the queue, 0 when it is empty.
    fn queue_end(&self) -> usize {
        self.micro_tasks
            .iter()
            .filter(|t| t.is_actionable())
            .map(|t| t.order)
            .max()
            .unwrap_or(0)
    }

    pub fn completed_count(&self) -> usize {
        self.micro_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }

    pub fn completed_categories(&self) -> HashSet<Category> {
        self.micro_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .filter_map(|t| self.goal(&t.goal_id))
            .map(|g| g.category)
            .collect()
    }

    pub fn progress_for(&self, day: NaiveDate) -> Option<&DailyProgress> {
        self.progress.iter().find(|p| p.day == day)
    }

    pub fn today_progress(&self, clock: &impl Clock) -> DailyProgress {
        let today = clock.today();
        self.progress_for(today)
            .cloned()
            .unwrap_or_else(|| DailyProgress::new(today, self.current_streak(today)))
    }

    /// The stored streak, or zero once a full day has passed without a completion.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        match self.last_active_day {
            Some(day) if day <= today && days_between(day, today) <= 1 => self.streak,
            _ => 0,
        }
    }

    pub fn has_achievement(&self, kind: AchievementKind) -> bool {
        self.achievements.iter().any(|a| a.kind == kind)
    }

    // Mutations

    pub fn complete_onboarding(
        &self,
        data: OnboardingData,
        clock: &impl Clock,
        ids: &impl IdGenerator,
    ) -> StateResult<Self> {
        data.validate()?;

        let mut next = self.clone();
        next.user = Some(UserProfile {
            id: ids.next_id(),
            name: "User".to_string(),
            avatar: data.avatar,
            procrastination_level: data.procrastination_level,
            preferences: UserPreferences::new(
                data.preferred_categories,
                data.available_minutes_per_day,
            ),
            created_at: clock.now(),
        });
        info!("onboarding completed");
        Ok(next)
    }

    pub fn update_preferences(&self, preferences: UserPreferences) -> StateResult<Self> {
        let mut next = self.clone();
        let user = next.user.as_mut().ok_or(StateError::NotOnboarded)?;
        user.preferences = preferences;
        Ok(next)
    }

    pub fn rename_user(&self, name: &str) -> StateResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StateError::InvalidOnboarding("name cannot be empty".to_string()));
        }
        let mut next = self.clone();
        let user = next.user.as_mut().ok_or(StateError::NotOnboarded)?;
        user.name = name.to_string();
        Ok(next)
    }

    /// Stores each confirmed task as a goal with a single micro-task. The
    /// batch keeps its ranked order and queues up behind the existing tasks.
    pub fn confirm_plan(
        &self,
        tasks: &[ClassifiedTask],
        clock: &impl Clock,
        ids: &impl IdGenerator,
    ) -> Self {
        let now = clock.now();
        let offset = self.queue_end();
        let mut next = self.clone();

        for task in tasks {
            let goal = Goal::new(
                ids.next_id(),
                task.description.clone(),
                task.category,
                task.priority,
                now,
            );
            next.micro_tasks.push(MicroTask::new(
                task.id,
                goal.id,
                task.description.clone(),
                task.estimated_duration_minutes,
                offset + task.order,
            ));
            next.goals.push(goal);
        }

        debug!("confirmed {} planned tasks", tasks.len());
        next
    }

    /// Steps queue up behind the existing tasks, in draft order.
    pub fn add_goal_draft(
        &self,
        draft: &GoalDraft,
        clock: &impl Clock,
        ids: &impl IdGenerator,
    ) -> (Self, Uuid) {
        let now = clock.now();
        let offset = self.queue_end();
        let mut next = self.clone();

        let goal = Goal::new(
            ids.next_id(),
            draft.title.clone(),
            draft.category,
            draft.priority,
            now,
        );
        for step in &draft.steps {
            next.micro_tasks.push(MicroTask::new(
                ids.next_id(),
                goal.id,
                step.description.clone(),
                step.duration_minutes,
                offset + step.order,
            ));
        }
        let goal_id = goal.id;
        next.goals.push(goal);

        debug!("added goal {} with {} steps", goal_id, draft.steps.len());
        (next, goal_id)
    }

    pub fn update_goal(
        &self,
        id: &Uuid,
        category: Option<Category>,
        priority: Option<Priority>,
        clock: &impl Clock,
    ) -> StateResult<Self> {
        let mut next = self.clone();
        let goal = next
            .goals
            .iter_mut()
            .find(|g| g.id == *id)
            .ok_or(StateError::GoalNotFound(*id))?;

        if let Some(category) = category {
            goal.category = category;
        }
        if let Some(priority) = priority {
            goal.priority = priority;
        }
        goal.updated_at = clock.now();
        Ok(next)
    }

    /// Removes the goal together with its micro-tasks.
    pub fn delete_goal(&self, id: &Uuid) -> StateResult<Self> {
        if self.goal(id).is_none() {
            return Err(StateError::GoalNotFound(*id));
        }
        let mut next = self.clone();
        next.goals.retain(|g| g.id != *id);
        next.micro_tasks.retain(|t| t.goal_id != *id);
        Ok(next)
    }

    /// Description and duration land on the micro-task, category and
    /// priority on its goal.
    pub fn edit_micro_task(
        &self,
        id: &Uuid,
        edit: &TaskEdit,
        clock: &impl Clock,
    ) -> StateResult<Self> {
        edit.validate()?;

        let mut next = self.clone();
        let task = next
            .micro_tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or(StateError::TaskNotFound(*id))?;

        if let Some(desc) = &edit.description {
            task.description = desc.trim().to_string();
        }
        if let Some(minutes) = edit.duration_minutes {
            task.duration_minutes = minutes;
        }
        let goal_id = task.goal_id;

        if edit.category.is_some() || edit.priority.is_some() {
            next = next.update_goal(&goal_id, edit.category, edit.priority, clock)?;
        }
        Ok(next)
    }

    /// Starts the next pending task. Nothing changes while a task is
    /// already in progress.
    pub fn activate_next(&self, clock: &impl Clock) -> StateResult<Self> {
        let mut next = self.clone();
        if self.in_progress_task().is_some() {
            return Ok(next);
        }
        let Some(id) = self.next_micro_task().map(|t| t.id) else {
            return Ok(next);
        };

        let task = next.task_mut(&id)?;
        task.start(clock.now())?;
        debug!("started micro-task {}", id);
        let goal_id = task.goal_id;
        next.refresh_goal_status(&goal_id, clock);
        Ok(next)
    }

    pub fn complete_micro_task(
        &self,
        id: &Uuid,
        actual_minutes: u32,
        clock: &impl Clock,
    ) -> StateResult<Self> {
        let now = clock.now();
        let today = clock.today();
        let mut next = self.clone();

        let task = next.task_mut(id)?;
        task.complete(now, actual_minutes)?;
        let goal_id = task.goal_id;
        let estimate = task.duration_minutes;

        next.record_progress(today, actual_minutes);
        next.adapt_next_step(&goal_id, actual_minutes, estimate);
        next.refresh_goal_status(&goal_id, clock);

        for kind in achievements::newly_unlocked(&next, today) {
            info!("achievement unlocked: {}", kind.title());
            next.achievements.push(Achievement { kind, unlocked_at: now });
        }

        Ok(next)
    }

    pub fn redo_micro_task(&self, id: &Uuid, clock: &impl Clock) -> StateResult<Self> {
        let mut next = self.clone();
        let task = next.task_mut(id)?;
        task.redo()?;
        let goal_id = task.goal_id;
        next.refresh_goal_status(&goal_id, clock);
        Ok(next)
    }

    // Helpers

    fn task_mut(&mut self, id: &Uuid) -> StateResult<&mut MicroTask> {
        self.micro_tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or(StateError::TaskNotFound(*id))
    }

    fn record_progress(&mut self, today: NaiveDate, minutes: u32) {
        // 1. Streak: consecutive days with at least one completion
        match self.last_active_day {
            Some(day) if day == today => {}
            Some(day) if day < today && days_between(day, today) == 1 => self.streak += 1,
            _ => self.streak = 1,
        }
        self.last_active_day = Some(today);

        // 2. Daily totals
        let streak = self.streak;
        match self.progress.iter_mut().find(|p| p.day == today) {
            Some(entry) => {
                entry.add(minutes);
                entry.streak = streak;
            }
            None => {
                let mut entry = DailyProgress::new(today, streak);
                entry.add(minutes);
                self.progress.push(entry);
            }
        }
    }

    fn adapt_next_step(&mut self, goal_id: &Uuid, actual_minutes: u32, estimate: u32) {
        let suggested = adjust_duration(actual_minutes, estimate);
        if suggested == estimate {
            return;
        }

        let next_step = self
            .micro_tasks
            .iter_mut()
            .filter(|t| t.goal_id == *goal_id && t.status == TaskStatus::Pending)
            .min_by_key(|t| t.order);

        if let Some(step) = next_step {
            debug!(
                "adjusting next step {} from {}m to {}m",
                step.id, step.duration_minutes, suggested
            );
            step.duration_minutes = suggested;
        }
    }

    fn refresh_goal_status(&mut self, goal_id: &Uuid, clock: &impl Clock) {
        let statuses: Vec<TaskStatus> = self.tasks_for_goal(goal_id).map(|t| t.status).collect();

        let all_done = statuses.iter().all(|s| *s == TaskStatus::Completed);
        let status = if !statuses.is_empty() && all_done {
            GoalStatus::Completed
        } else if statuses.iter().any(|s| *s != TaskStatus::Pending) {
            GoalStatus::InProgress
        } else {
            GoalStatus::Pending
        };

        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == *goal_id) {
            if goal.status != status {
                goal.status = status;
                goal.updated_at = clock.now();
            }
        }
    }
}
