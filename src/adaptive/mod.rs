pub mod config;
pub mod decision;
pub mod engine;
pub mod modeling;
pub mod session;
pub mod types;

pub use config::AdaptiveConfig;
pub use engine::{AdaptiveDifficultyEngine, EngineSnapshot};
pub use session::{SessionStats, SessionSummary};
pub use types::*;
