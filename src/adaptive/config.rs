use serde::{Deserialize, Serialize};

use crate::error::{GardenError, GardenResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationParams {
    pub max_problems: u32,
    pub jump_time_secs: f64,
    pub fast_time_secs: f64,
    pub jump_amount: u32,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            max_problems: 5,
            jump_time_secs: 5.0,
            fast_time_secs: 10.0,
            jump_amount: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteadyParams {
    pub streak_up: u32,
    pub streak_down: u32,
    pub mastery_accuracy: f64,
    pub mastery_time_secs: f64,
    pub struggle_accuracy: f64,
    pub struggle_time_secs: f64,
    /// Metrics reported for an empty window.
    pub neutral_accuracy: f64,
    pub neutral_time_secs: f64,
}

impl Default for SteadyParams {
    fn default() -> Self {
        Self {
            streak_up: 3,
            streak_down: 2,
            mastery_accuracy: 0.9,
            mastery_time_secs: 5.0,
            struggle_accuracy: 0.6,
            struggle_time_secs: 20.0,
            neutral_accuracy: 0.5,
            neutral_time_secs: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionParams {
    pub frustrated_accuracy: f64,
    pub frustrated_time_secs: f64,
    pub distracted_time_secs: f64,
    pub decline_high_accuracy: f64,
    pub decline_low_accuracy: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            frustrated_accuracy: 0.5,
            frustrated_time_secs: 3.0,
            distracted_time_secs: 30.0,
            decline_high_accuracy: 0.7,
            decline_low_accuracy: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    pub recent_window: usize,
    pub default_max_level: u32,
    pub calibration: CalibrationParams,
    pub steady: SteadyParams,
    pub detection: DetectionParams,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            recent_window: 5,
            default_max_level: 5,
            calibration: CalibrationParams::default(),
            steady: SteadyParams::default(),
            detection: DetectionParams::default(),
        }
    }
}

impl AdaptiveConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GARDEN_RECENT_WINDOW") {
            config.recent_window = val.parse().unwrap_or(config.recent_window);
        }
        if let Ok(val) = std::env::var("GARDEN_CALIBRATION_PROBLEMS") {
            config.calibration.max_problems =
                val.parse().unwrap_or(config.calibration.max_problems);
        }
        if let Ok(val) = std::env::var("GARDEN_DEFAULT_MAX_LEVEL") {
            config.default_max_level = val.parse().unwrap_or(config.default_max_level);
        }

        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "adaptive config rejected, using defaults");
            return Self::default();
        }

        config
    }

    pub fn validate(&self) -> GardenResult<()> {
        if self.recent_window == 0 {
            return Err(GardenError::Validation(
                "recent_window must be at least 1".to_string(),
            ));
        }
        if self.default_max_level == 0 {
            return Err(GardenError::Validation(
                "default_max_level must be at least 1".to_string(),
            ));
        }
        if self.calibration.max_problems == 0 {
            return Err(GardenError::Validation(
                "calibration.max_problems must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AdaptiveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recent_window, 5);
        assert_eq!(config.calibration.max_problems, 5);
        assert_eq!(config.default_max_level, 5);
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = AdaptiveConfig {
            recent_window: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GardenError::Validation(_))));
    }

    #[test]
    fn test_zero_calibration_rejected() {
        let mut config = AdaptiveConfig::default();
        config.calibration.max_problems = 0;
        assert!(config.validate().is_err());
    }
}
