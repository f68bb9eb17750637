use procrastinar_core::{AchievementKind, DailyProgress, MicroTask, TimerEvent, Countdown};

use crate::Controller;

const UPCOMING_LIMIT: usize = 5;

pub struct App {
    pub controller: Controller,
    pub current: Option<MicroTask>,
    pub timer: Option<Countdown>,
    pub message: Option<String>,
    pub celebrate: Vec<AchievementKind>,
}

impl App {
    pub fn new(mut controller: Controller) -> App {
        let (current, message) = match controller.current_task() {
            Ok(task) => (task, None),
            Err(e) => (None, Some(format!("Error: {}", e))),
        };
        let timer = current.as_ref().map(|t| Countdown::new(t.duration_minutes));
        App {
            controller,
            current,
            timer,
            message,
            celebrate: Vec::new(),
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            if timer.tick() == TimerEvent::Expired {
                self.message =
                    Some("Time's up! Press c to complete or r to start over.".to_string());
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            if timer.is_running() {
                timer.pause();
                self.message = Some("Paused.".to_string());
            } else if !timer.is_expired() {
                timer.resume();
                self.message = None;
            }
        }
    }

    pub fn complete(&mut self) {
        let (Some(task), Some(timer)) = (self.current.as_ref(), self.timer.as_ref()) else {
            return;
        };
        let minutes = timer.elapsed_minutes().max(1);

        match self.controller.complete(&task.id, minutes) {
            Ok(report) => {
                let done = &report.completed.description;
                self.message = Some(format!("✔ {} in {} min", done, minutes));
                self.celebrate = report.unlocked;
                self.timer = report.next.as_ref().map(|t| Countdown::new(t.duration_minutes));
                self.current = report.next;
            }
            Err(e) => self.message = Some(format!("Error: {}", e)),
        }
    }

    pub fn redo(&mut self) {
        if self.current.is_none() {
            return;
        }
        match self.controller.redo_current() {
            Ok(task) => {
                self.timer = Some(Countdown::new(task.duration_minutes));
                self.message = Some("Starting over. You've got this.".to_string());
                self.current = Some(task);
            }
            Err(e) => self.message = Some(format!("Error: {}", e)),
        }
    }

    pub fn upcoming(&self) -> Vec<&MicroTask> {
        let current_id = self.current.as_ref().map(|t| t.id);
        let mut tasks: Vec<&MicroTask> = self
            .controller
            .state()
            .micro_tasks
            .iter()
            .filter(|t| t.is_actionable() && Some(t.id) != current_id)
            .collect();
        tasks.sort_by_key(|t| t.order);
        tasks.truncate(UPCOMING_LIMIT);
        tasks
    }

    pub fn today(&self) -> DailyProgress {
        self.controller.state().today_progress(self.controller.clock())
    }

    pub fn phrase(&self) -> Option<String> {
        let user = self.controller.state().user.as_ref()?;
        let seed = self.controller.state().completed_count();
        Some(format!("{} {}", user.avatar.emoji(), user.avatar.phrase(seed)))
    }
}
