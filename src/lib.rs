pub mod adaptive;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod skills;

pub use adaptive::{AdaptiveConfig, AdaptiveDifficultyEngine};
pub use error::{GardenError, GardenResult};
pub use skills::{Skill, SkillCatalog};
