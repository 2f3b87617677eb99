use serde::{Deserialize, Serialize};

/// On-screen support, ordered from most help to least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ScaffoldLevel {
    #[default]
    Full,
    Partial,
    Peek,
    None,
}

impl ScaffoldLevel {
    /// One step toward `None`; saturates.
    pub fn reduce(&self) -> Self {
        match self {
            Self::Full => Self::Partial,
            Self::Partial => Self::Peek,
            _ => Self::None,
        }
    }

    /// One step toward `Full`; saturates.
    pub fn increase(&self) -> Self {
        match self {
            Self::None => Self::Peek,
            Self::Peek => Self::Partial,
            _ => Self::Full,
        }
    }

    pub fn apply(&self, change: ScaffoldChange) -> Self {
        match change {
            ScaffoldChange::Reduce => self.reduce(),
            ScaffoldChange::Increase => self.increase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum AdjustmentAction {
    #[default]
    Continue,
    LevelUp,
    LevelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaffoldChange {
    Reduce,
    Increase,
}

/// Decision returned by `record_result`. It has already been applied to the engine
/// by the time the caller sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub action: AdjustmentAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaffold_change: Option<ScaffoldChange>,
    #[serde(default)]
    pub calibration_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_level: Option<u32>,
}

impl Adjustment {
    pub fn hold(reason: impl Into<String>) -> Self {
        Self {
            action: AdjustmentAction::Continue,
            amount: None,
            reason: reason.into(),
            scaffold_change: None,
            calibration_complete: false,
            found_level: None,
        }
    }

    pub fn level_up(amount: u32, reason: impl Into<String>) -> Self {
        Self {
            action: AdjustmentAction::LevelUp,
            amount: Some(amount),
            ..Self::hold(reason)
        }
    }

    pub fn level_down(amount: u32, reason: impl Into<String>) -> Self {
        Self {
            action: AdjustmentAction::LevelDown,
            amount: Some(amount),
            ..Self::hold(reason)
        }
    }

    pub fn with_scaffold(mut self, change: ScaffoldChange) -> Self {
        self.scaffold_change = Some(change);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LearnerState {
    #[default]
    Normal,
    Frustrated,
    Distracted,
    Declining,
}

impl LearnerState {
    /// Supportive text for the UI, if the state warrants one.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Frustrated => Some("Slow down and take your time. There is no rush!"),
            Self::Distracted => Some("Still with us? Maybe it's a good moment for a short break."),
            Self::Declining => Some("You've been working hard. How about a quick stretch?"),
        }
    }
}

/// Consecutive same-outcome counters. At most one of them is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub correct: u32,
    pub wrong: u32,
}

impl Streaks {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct = self.correct.saturating_add(1);
            self.wrong = 0;
        } else {
            self.wrong = self.wrong.saturating_add(1);
            self.correct = 0;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub correct: bool,
    pub time: f64,
    pub skill: Option<String>,
    pub level: u32,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelChange {
    pub direction: LevelDirection,
    pub level: u32,
    pub timestamp: i64,
}
