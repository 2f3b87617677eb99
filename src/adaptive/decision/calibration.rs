use crate::adaptive::config::CalibrationParams;
use crate::adaptive::types::Adjustment;

/// Probing policy used for the first few problems of a skill. It moves in large
/// steps to find a starting level instead of waiting for streaks.
pub struct CalibrationPolicy {
    params: CalibrationParams,
}

impl CalibrationPolicy {
    pub fn new(params: CalibrationParams) -> Self {
        Self { params }
    }

    pub fn decide(&self, correct: bool, time_secs: f64) -> Adjustment {
        if correct && time_secs < self.params.jump_time_secs {
            Adjustment::level_up(self.params.jump_amount, "Jumping ahead!")
        } else if correct && time_secs < self.params.fast_time_secs {
            Adjustment::level_up(1, "Nice work, let's try a little harder")
        } else if !correct {
            Adjustment::level_down(1, "Let's try something a bit easier")
        } else {
            Adjustment::hold("Correct! Still finding your level")
        }
    }

    pub fn max_problems(&self) -> u32 {
        self.params.max_problems
    }
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self::new(CalibrationParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::types::AdjustmentAction;

    #[test]
    fn test_fast_correct_jumps() {
        let policy = CalibrationPolicy::default();
        let adj = policy.decide(true, 3.0);
        assert_eq!(adj.action, AdjustmentAction::LevelUp);
        assert_eq!(adj.amount, Some(2));
    }

    #[test]
    fn test_boundaries() {
        let policy = CalibrationPolicy::default();
        assert_eq!(policy.decide(true, 5.0).amount, Some(1));
        assert_eq!(policy.decide(true, 10.0).action, AdjustmentAction::Continue);
        assert_eq!(policy.decide(false, 1.0).action, AdjustmentAction::LevelDown);
    }

    #[test]
    fn test_calibration_never_touches_scaffold() {
        let policy = CalibrationPolicy::default();
        for (correct, time) in [(true, 1.0), (true, 7.0), (true, 15.0), (false, 2.0)] {
            assert!(policy.decide(correct, time).scaffold_change.is_none());
        }
    }
}
