//! Moment extraction: classification, team fight clustering and ranking.

pub mod classifier;
pub mod engine;
pub mod ranker;
pub mod team_fight;

pub use classifier::*;
pub use engine::*;
pub use ranker::*;
pub use team_fight::*;
