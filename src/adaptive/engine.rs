use serde::{Deserialize, Serialize};

use crate::adaptive::config::AdaptiveConfig;
use crate::adaptive::decision::{CalibrationPolicy, SteadyPolicy};
use crate::adaptive::modeling::{RecentWindow, StateDetector};
use crate::adaptive::session::{SessionStats, SessionSummary};
use crate::adaptive::types::*;
use crate::error::{GardenError, GardenResult};
use crate::skills::SkillCatalog;

/// Serializable image of an engine, for hosts that persist sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub current_skill: Option<String>,
    pub current_level: u32,
    pub scaffolding: ScaffoldLevel,
    pub streaks: Streaks,
    pub is_calibrating: bool,
    pub calibration_problems: u32,
    pub recent_results: Vec<ResultRecord>,
    pub session: SessionStats,
}

/// Tracks one learner on one skill at a time and adjusts level and scaffolding
/// after every answer.
pub struct AdaptiveDifficultyEngine {
    config: AdaptiveConfig,
    catalog: SkillCatalog,
    calibration: CalibrationPolicy,
    steady: SteadyPolicy,
    detector: StateDetector,
    current_skill: Option<String>,
    current_level: u32,
    scaffolding: ScaffoldLevel,
    streaks: Streaks,
    is_calibrating: bool,
    calibration_problems: u32,
    recent: RecentWindow,
    session: SessionStats,
}

impl AdaptiveDifficultyEngine {
    pub fn new(config: AdaptiveConfig, catalog: SkillCatalog) -> Self {
        Self::new_at(config, catalog, now_ms())
    }

    pub fn new_at(config: AdaptiveConfig, catalog: SkillCatalog, started_at: i64) -> Self {
        Self {
            calibration: CalibrationPolicy::new(config.calibration.clone()),
            steady: SteadyPolicy::new(config.steady.clone()),
            detector: StateDetector::new(config.detection.clone()),
            recent: RecentWindow::new(config.recent_window),
            session: SessionStats::new(started_at),
            current_skill: None,
            current_level: 1,
            scaffolding: ScaffoldLevel::Full,
            streaks: Streaks::default(),
            is_calibrating: true,
            calibration_problems: 0,
            config,
            catalog,
        }
    }

    pub fn restore(
        config: AdaptiveConfig,
        catalog: SkillCatalog,
        snapshot: EngineSnapshot,
    ) -> GardenResult<Self> {
        let mut engine = Self::new_at(config, catalog, snapshot.session.started_at);
        engine.current_skill = snapshot.current_skill;

        let max_level = engine.max_level();
        if snapshot.current_level < 1 || snapshot.current_level > max_level {
            return Err(GardenError::InvalidSnapshot(format!(
                "level {} outside 1..={}",
                snapshot.current_level, max_level
            )));
        }
        if snapshot.streaks.correct > 0 && snapshot.streaks.wrong > 0 {
            return Err(GardenError::InvalidSnapshot(
                "correct and wrong streaks are both active".to_string(),
            ));
        }
        if snapshot.recent_results.len() > engine.recent.capacity() {
            return Err(GardenError::InvalidSnapshot(format!(
                "{} recent results exceed window of {}",
                snapshot.recent_results.len(),
                engine.recent.capacity()
            )));
        }
        let calibration_limit = engine.calibration.max_problems();
        if snapshot.calibration_problems > calibration_limit
            || (snapshot.is_calibrating && snapshot.calibration_problems == calibration_limit)
        {
            return Err(GardenError::InvalidSnapshot(format!(
                "calibration counter {} past limit {}",
                snapshot.calibration_problems, calibration_limit
            )));
        }
        if let Some(record) = snapshot
            .recent_results
            .iter()
            .find(|r| !r.time.is_finite() || r.time < 0.0)
        {
            return Err(GardenError::InvalidSnapshot(format!(
                "recent result has invalid time {}",
                record.time
            )));
        }
        if !snapshot.session.total_time.is_finite() || snapshot.session.total_time < 0.0 {
            return Err(GardenError::InvalidSnapshot(format!(
                "session total time {} is invalid",
                snapshot.session.total_time
            )));
        }
        if snapshot.session.correct > snapshot.session.total_problems {
            return Err(GardenError::InvalidSnapshot(format!(
                "{} correct answers out of {} problems",
                snapshot.session.correct, snapshot.session.total_problems
            )));
        }

        engine.current_level = snapshot.current_level;
        engine.scaffolding = snapshot.scaffolding;
        engine.streaks = snapshot.streaks;
        engine.is_calibrating = snapshot.is_calibrating;
        engine.calibration_problems = snapshot.calibration_problems;
        for record in snapshot.recent_results {
            engine.recent.push(record);
        }
        engine.session = snapshot.session;

        Ok(engine)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_skill: self.current_skill.clone(),
            current_level: self.current_level,
            scaffolding: self.scaffolding,
            streaks: self.streaks,
            is_calibrating: self.is_calibrating,
            calibration_problems: self.calibration_problems,
            recent_results: self.recent.to_vec(),
            session: self.session.clone(),
        }
    }

    /// Switches skill. Without a start level the engine calibrates from the middle
    /// of the skill's range.
    pub fn set_skill(&mut self, skill_id: &str, start_level: Option<u32>) {
        self.current_skill = Some(skill_id.to_string());
        let max_level = self.max_level();

        match start_level {
            Some(level) => {
                self.current_level = level.clamp(1, max_level);
                self.is_calibrating = false;
            }
            None => {
                self.current_level = max_level.div_ceil(2).max(1);
                self.is_calibrating = true;
            }
        }
        self.calibration_problems = 0;
        self.streaks.clear();

        tracing::info!(
            skill = skill_id,
            level = self.current_level,
            max_level,
            calibrating = self.is_calibrating,
            "skill selected"
        );
    }

    pub fn record_result(&mut self, correct: bool, time_secs: f64) -> Adjustment {
        self.record_result_at(correct, time_secs, now_ms())
    }

    pub fn record_result_at(&mut self, correct: bool, time_secs: f64, timestamp: i64) -> Adjustment {
        let time_secs = if time_secs.is_finite() && time_secs > 0.0 {
            time_secs
        } else {
            0.0
        };

        self.recent.push(ResultRecord {
            correct,
            time: time_secs,
            skill: self.current_skill.clone(),
            level: self.current_level,
            timestamp,
        });
        self.streaks.record(correct);
        self.session
            .record_answer(correct, time_secs, self.current_skill.as_deref());

        tracing::debug!(
            skill = ?self.current_skill,
            level = self.current_level,
            correct,
            time_secs,
            streak_correct = self.streaks.correct,
            streak_wrong = self.streaks.wrong,
            calibrating = self.is_calibrating,
            "answer recorded"
        );

        if self.is_calibrating {
            self.calibrate(correct, time_secs, timestamp)
        } else {
            let adjustment = self.steady.decide(&mut self.streaks, &self.recent);
            self.apply(&adjustment, timestamp);
            adjustment
        }
    }

    fn calibrate(&mut self, correct: bool, time_secs: f64, timestamp: i64) -> Adjustment {
        let mut adjustment = self.calibration.decide(correct, time_secs);
        self.apply(&adjustment, timestamp);

        self.calibration_problems += 1;
        if self.calibration_problems >= self.calibration.max_problems() {
            self.is_calibrating = false;
            adjustment.calibration_complete = true;
            adjustment.found_level = Some(self.current_level);
            tracing::info!(
                skill = ?self.current_skill,
                level = self.current_level,
                "calibration complete"
            );
        }

        adjustment
    }

    fn apply(&mut self, adjustment: &Adjustment, timestamp: i64) {
        let max_level = self.max_level();
        let amount = adjustment.amount.unwrap_or(1);
        let previous = self.current_level;

        let direction = match adjustment.action {
            AdjustmentAction::LevelUp => {
                self.current_level = self.current_level.saturating_add(amount).min(max_level);
                Some(LevelDirection::Up)
            }
            AdjustmentAction::LevelDown => {
                self.current_level = self.current_level.saturating_sub(amount).max(1);
                Some(LevelDirection::Down)
            }
            AdjustmentAction::Continue => None,
        };

        if let Some(direction) = direction {
            self.session
                .record_level_change(direction, self.current_level, timestamp);
            tracing::info!(
                skill = ?self.current_skill,
                from = previous,
                to = self.current_level,
                reason = %adjustment.reason,
                "level changed"
            );
        }

        if let Some(change) = adjustment.scaffold_change {
            self.scaffolding = self.scaffolding.apply(change);
        }
    }

    /// Read-only; repeated calls without new answers agree.
    pub fn detect_state(&self) -> LearnerState {
        self.detector.detect(&self.recent)
    }

    pub fn session_summary(&self) -> SessionSummary {
        self.session_summary_at(now_ms())
    }

    pub fn session_summary_at(&self, now_ms: i64) -> SessionSummary {
        self.session.summarize(
            now_ms,
            self.current_skill.as_deref(),
            self.current_level,
            self.scaffolding,
        )
    }

    pub fn reset(&mut self) {
        self.reset_at(now_ms());
    }

    /// Starts a new session. Skill and level carry over.
    pub fn reset_at(&mut self, started_at: i64) {
        self.recent.clear();
        self.session = SessionStats::new(started_at);
        self.streaks.clear();
        self.is_calibrating = true;
        self.calibration_problems = 0;
        self.scaffolding = ScaffoldLevel::Full;
        tracing::info!(skill = ?self.current_skill, level = self.current_level, "session reset");
    }

    pub fn max_level(&self) -> u32 {
        self.current_skill
            .as_deref()
            .and_then(|id| self.catalog.max_level(id))
            .unwrap_or(self.config.default_max_level)
            .max(1)
    }

    pub fn current_skill(&self) -> Option<&str> {
        self.current_skill.as_deref()
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn scaffolding(&self) -> ScaffoldLevel {
        self.scaffolding
    }

    pub fn streaks(&self) -> Streaks {
        self.streaks
    }

    pub fn is_calibrating(&self) -> bool {
        self.is_calibrating
    }

    pub fn calibration_problems(&self) -> u32 {
        self.calibration_problems
    }

    pub fn recent_results(&self) -> &RecentWindow {
        &self.recent
    }

    pub fn session(&self) -> &SessionStats {
        &self.session
    }
}

impl Default for AdaptiveDifficultyEngine {
    fn default() -> Self {
        Self::new(AdaptiveConfig::default(), SkillCatalog::number_garden())
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
