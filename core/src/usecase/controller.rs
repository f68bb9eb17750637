use anyhow::{anyhow, Result};
use tracing::{info, warn};
use uuid::Uuid;

use crate::id::IdGenerator;
use crate::input::expand_key;
use crate::model::category::Category;
use crate::model::progress::AchievementKind;
use crate::model::task::{ClassifiedTask, MicroTask, Priority, TaskEdit};
use crate::model::user::{OnboardingData, UserPreferences};
use crate::repository::StateRepository;
use crate::service::breakdown::GoalDraft;
use crate::state::AppState;
use crate::time::Clock;
use crate::usecase::planner::TaskPlanner;

const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..SHORT_ID_LEN].to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub completed: MicroTask,
    pub next: Option<MicroTask>,
    pub unlocked: Vec<AchievementKind>,
}

/// Owns the application state and is the only place that writes it.
///
/// Every change is saved before it becomes visible; when saving fails the
/// previous state stays in place and the error is returned as is.
pub struct AppController<R: StateRepository, C: Clock, G: IdGenerator> {
    repo: R,
    clock: C,
    ids: G,
    planner: TaskPlanner,
    state: AppState,
}

impl<R: StateRepository, C: Clock, G: IdGenerator> AppController<R, C, G> {
    pub fn new(repo: R, clock: C, ids: G) -> Result<Self> {
        let state = repo.load()?.unwrap_or_default();
        Ok(Self {
            repo,
            clock,
            ids,
            planner: TaskPlanner::new()?,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs `f` against the current state and installs its result.
    pub fn apply<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&AppState, &C, &G) -> Result<AppState>,
    {
        let next = f(&self.state, &self.clock, &self.ids)?;
        self.commit(next)
    }

    fn commit(&mut self, next: AppState) -> Result<()> {
        if next == self.state {
            return Ok(());
        }
        if let Err(e) = self.repo.save(&next) {
            warn!("could not save state: {:#}", e);
            return Err(e);
        }
        self.state = next;
        Ok(())
    }

    // Onboarding and preferences

    pub fn onboard(&mut self, data: OnboardingData) -> Result<()> {
        self.apply(|state, clock, ids| Ok(state.complete_onboarding(data, clock, ids)?))
    }

    pub fn update_preferences(&mut self, preferences: UserPreferences) -> Result<()> {
        self.apply(|state, _, _| Ok(state.update_preferences(preferences)?))
    }

    pub fn rename_user(&mut self, name: &str) -> Result<()> {
        self.apply(|state, _, _| Ok(state.rename_user(name)?))
    }

    // Planning

    /// Preview only, nothing is stored until [`AppController::confirm`].
    pub fn plan(&self, text: &str) -> Vec<ClassifiedTask> {
        self.planner.plan(text, &self.state.preferences(), &self.ids)
    }

    /// Stores all tasks of one submission, or none of them.
    pub fn confirm(&mut self, tasks: &[ClassifiedTask]) -> Result<usize> {
        if tasks.is_empty() {
            return Ok(0);
        }
        self.apply(|state, clock, ids| {
            Ok(state.confirm_plan(tasks, clock, ids).activate_next(clock)?)
        })?;
        info!("stored {} micro-tasks", tasks.len());
        Ok(tasks.len())
    }

    pub fn draft_goal(&self, text: &str) -> Result<GoalDraft> {
        if text.trim().is_empty() {
            return Err(anyhow!("Goal text is required"));
        }
        Ok(self.planner.break_down(text))
    }

    pub fn add_goal(&mut self, draft: &GoalDraft) -> Result<Uuid> {
        let mut goal_id = None;
        self.apply(|state, clock, ids| {
            let (next, id) = state.add_goal_draft(draft, clock, ids);
            goal_id = Some(id);
            Ok(next.activate_next(clock)?)
        })?;
        goal_id.ok_or_else(|| anyhow!("Goal was not created"))
    }

    // Task lifecycle

    /// The next actionable task, moved to in-progress if it was pending.
    pub fn current_task(&mut self) -> Result<Option<MicroTask>> {
        self.apply(|state, clock, _| Ok(state.activate_next(clock)?))?;
        Ok(self.state.next_micro_task().cloned())
    }

    pub fn complete_current(&mut self, actual_minutes: u32) -> Result<CompletionReport> {
        let id = self
            .current_task()?
            .map(|t| t.id)
            .ok_or_else(|| anyhow!("No pending micro-tasks"))?;
        self.complete(&id, actual_minutes)
    }

    pub fn complete(&mut self, id: &Uuid, actual_minutes: u32) -> Result<CompletionReport> {
        let before = self.state.achievements.len();
        self.apply(|state, clock, _| {
            Ok(state.complete_micro_task(id, actual_minutes, clock)?.activate_next(clock)?)
        })?;

        let completed = self
            .state
            .micro_task(id)
            .cloned()
            .ok_or_else(|| anyhow!("Micro-task {} vanished after completion", id))?;
        let unlocked = self.state.achievements[before..].iter().map(|a| a.kind).collect();

        Ok(CompletionReport {
            completed,
            next: self.state.next_micro_task().cloned(),
            unlocked,
        })
    }

    pub fn redo(&mut self, id: &Uuid) -> Result<()> {
        self.apply(|state, clock, _| Ok(state.redo_micro_task(id, clock)?))
    }

    /// Restarts the task in progress from scratch.
    pub fn redo_current(&mut self) -> Result<MicroTask> {
        let id = self
            .state
            .in_progress_task()
            .map(|t| t.id)
            .ok_or_else(|| anyhow!("No micro-task in progress"))?;
        self.apply(|state, clock, _| {
            Ok(state.redo_micro_task(&id, clock)?.activate_next(clock)?)
        })?;
        self.state
            .in_progress_task()
            .cloned()
            .ok_or_else(|| anyhow!("No pending micro-tasks"))
    }

    // Edits

    pub fn edit_task(&mut self, id: &Uuid, edit: &TaskEdit) -> Result<()> {
        self.apply(|state, clock, _| Ok(state.edit_micro_task(id, edit, clock)?))
    }

    pub fn update_goal(
        &mut self,
        id: &Uuid,
        category: Option<Category>,
        priority: Option<Priority>,
    ) -> Result<()> {
        self.apply(|state, clock, _| Ok(state.update_goal(id, category, priority, clock)?))
    }

    pub fn delete_goal(&mut self, id: &Uuid) -> Result<()> {
        self.apply(|state, clock, _| Ok(state.delete_goal(id)?.activate_next(clock)?))?;
        info!("deleted goal {}", id);
        Ok(())
    }

    // Lookups by short id

    pub fn resolve_task_id(&self, prefix: &str) -> Result<Uuid> {
        let candidates: Vec<String> =
            self.state.micro_tasks.iter().map(|t| t.id.to_string()).collect();
        let full = expand_key(prefix, &candidates)?;
        Ok(Uuid::parse_str(&full)?)
    }

    pub fn resolve_goal_id(&self, prefix: &str) -> Result<Uuid> {
        let candidates: Vec<String> = self.state.goals.iter().map(|g| g.id.to_string()).collect();
        let full = expand_key(prefix, &candidates)?;
        Ok(Uuid::parse_str(&full)?)
    }
}
