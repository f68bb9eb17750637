pub mod config;
pub mod error;
pub mod id;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod state;
pub mod time;
pub mod timer;
pub mod usecase;


pub use config::Config;
pub use error::{StateError, StateResult};
pub use id::{IdGenerator, RandomIds, SequentialIds};
pub use input::{expand_key, TaskExtractor};
pub use model::category::Category;
pub use model::progress::{Achievement, AchievementKind, DailyProgress};
pub use model::task::{
    ClassifiedTask, Goal, GoalStatus, MicroTask, Priority, TaskEdit, TaskStatus,
};
pub use model::user::{Avatar, OnboardingData, UserPreferences, UserProfile};
pub use repository::{FileStateRepository, InMemoryStateRepository, StateRepository};
pub use service::breakdown::{adjust_duration, emergency_steps, GoalDraft, StepTemplate};
pub use service::classifier::{Classification, Classifier};
pub use service::ranker::{calculate_score, rank_tasks};
pub use state::AppState;
pub use time::{Clock, FixedClock, SystemClock};
pub use timer::{Countdown, TimerEvent};
pub use usecase::agenda::{daily_agenda, AgendaEntry};
pub use usecase::controller::{short_id, AppController, CompletionReport};
pub use usecase::planner::{edit_plan, TaskPlanner};
