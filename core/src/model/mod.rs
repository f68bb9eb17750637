pub mod category;
pub mod progress;
pub mod task;
pub mod user;
