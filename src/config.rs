use std::path::PathBuf;

use crate::adaptive::AdaptiveConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub skills_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub adaptive: AdaptiveConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let skills_path = std::env::var("GARDEN_SKILLS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let snapshot_path = std::env::var("GARDEN_SNAPSHOT_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            log_level,
            skills_path,
            snapshot_path,
            adaptive: AdaptiveConfig::from_env(),
        }
    }
}
