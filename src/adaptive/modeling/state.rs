use crate::adaptive::config::DetectionParams;
use crate::adaptive::modeling::RecentWindow;
use crate::adaptive::types::LearnerState;

pub struct StateDetector {
    params: DetectionParams,
}

impl StateDetector {
    pub fn new(params: DetectionParams) -> Self {
        Self { params }
    }

    /// Classifies the learner from the recent window alone. The declining check
    /// compares the first two entries against the last two, so with a window of
    /// five the middle answer is not considered.
    pub fn detect(&self, window: &RecentWindow) -> LearnerState {
        if window.len() < 2 {
            return LearnerState::Normal;
        }

        if let Some(last) = window.last(2) {
            if last.accuracy < self.params.frustrated_accuracy
                && last.avg_time < self.params.frustrated_time_secs
            {
                return LearnerState::Frustrated;
            }
            if last.avg_time > self.params.distracted_time_secs {
                return LearnerState::Distracted;
            }
        }

        if window.len() >= 4 {
            if let (Some(early), Some(late)) = (window.first(2), window.last(2)) {
                if early.accuracy > self.params.decline_high_accuracy
                    && late.accuracy < self.params.decline_low_accuracy
                {
                    return LearnerState::Declining;
                }
            }
        }

        LearnerState::Normal
    }
}

impl Default for StateDetector {
    fn default() -> Self {
        Self::new(DetectionParams::default())
    }
}
