pub mod achievements;
pub mod breakdown;
pub mod classifier;
pub mod ranker;
