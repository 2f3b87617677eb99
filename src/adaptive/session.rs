use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::adaptive::types::{LevelChange, LevelDirection, ScaffoldLevel};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_problems: u32,
    pub correct: u32,
    pub total_time: f64,
    pub skills_attempted: BTreeSet<String>,
    pub level_changes: Vec<LevelChange>,
    pub started_at: i64,
}

impl SessionStats {
    pub fn new(started_at: i64) -> Self {
        Self {
            total_problems: 0,
            correct: 0,
            total_time: 0.0,
            skills_attempted: BTreeSet::new(),
            level_changes: Vec::new(),
            started_at,
        }
    }

    pub fn record_answer(&mut self, correct: bool, time_secs: f64, skill: Option<&str>) {
        self.total_problems = self.total_problems.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.total_time += time_secs;
        if let Some(skill) = skill {
            if !self.skills_attempted.contains(skill) {
                self.skills_attempted.insert(skill.to_string());
            }
        }
    }

    pub fn record_level_change(&mut self, direction: LevelDirection, level: u32, timestamp: i64) {
        self.level_changes.push(LevelChange {
            direction,
            level,
            timestamp,
        });
    }

    pub fn summarize(
        &self,
        now_ms: i64,
        current_skill: Option<&str>,
        final_level: u32,
        final_scaffold: ScaffoldLevel,
    ) -> SessionSummary {
        let elapsed_ms = now_ms.saturating_sub(self.started_at).max(0);
        let duration_minutes = (elapsed_ms as f64 / 60_000.0).round() as u64;

        let (accuracy_percent, avg_time_seconds) = if self.total_problems == 0 {
            (0, 0.0)
        } else {
            let total = self.total_problems as f64;
            let accuracy = (self.correct as f64 / total * 100.0).round() as u32;
            let avg_time = (self.total_time / total * 10.0).round() / 10.0;
            (accuracy, avg_time)
        };

        SessionSummary {
            duration_minutes,
            total_problems: self.total_problems,
            correct: self.correct,
            accuracy_percent,
            avg_time_seconds,
            skills_attempted: self.skills_attempted.iter().cloned().collect(),
            level_changes: self.level_changes.clone(),
            current_skill: current_skill.map(str::to_string),
            final_level,
            final_scaffold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub duration_minutes: u64,
    pub total_problems: u32,
    pub correct: u32,
    pub accuracy_percent: u32,
    pub avg_time_seconds: f64,
    pub skills_attempted: Vec<String>,
    pub level_changes: Vec<LevelChange>,
    pub current_skill: Option<String>,
    pub final_level: u32,
    pub final_scaffold: ScaffoldLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000_000;

    #[test]
    fn test_empty_summary() {
        let stats = SessionStats::new(START);
        let summary = stats.summarize(START, None, 1, ScaffoldLevel::Full);
        assert_eq!(summary.total_problems, 0);
        assert_eq!(summary.accuracy_percent, 0);
        assert_eq!(summary.avg_time_seconds, 0.0);
        assert!(summary.skills_attempted.is_empty());
        assert!(summary.level_changes.is_empty());
    }

    #[test]
    fn test_rounding() {
        let mut stats = SessionStats::new(START);
        stats.record_answer(true, 3.0, Some("addition"));
        stats.record_answer(false, 4.0, Some("addition"));
        stats.record_answer(true, 4.0, Some("subtraction"));
        let summary = stats.summarize(START + 150_000, Some("subtraction"), 2, ScaffoldLevel::Peek);
        assert_eq!(summary.accuracy_percent, 67);
        assert_eq!(summary.avg_time_seconds, 3.7);
        assert_eq!(summary.duration_minutes, 3);
        assert_eq!(summary.skills_attempted, vec!["addition", "subtraction"]);
    }

    #[test]
    fn test_clock_skew_is_zero_duration() {
        let stats = SessionStats::new(START);
        let summary = stats.summarize(START - 5_000, None, 1, ScaffoldLevel::Full);
        assert_eq!(summary.duration_minutes, 0);
    }
}
