pub mod agenda;
pub mod controller;
pub mod planner;
