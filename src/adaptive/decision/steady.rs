use crate::adaptive::config::SteadyParams;
use crate::adaptive::modeling::{RecentWindow, WindowMetrics};
use crate::adaptive::types::{Adjustment, ScaffoldChange, Streaks};

pub struct SteadyPolicy {
    params: SteadyParams,
}

impl SteadyPolicy {
    pub fn new(params: SteadyParams) -> Self {
        Self { params }
    }

    pub fn metrics(&self, window: &RecentWindow) -> WindowMetrics {
        window.metrics().unwrap_or(WindowMetrics {
            accuracy: self.params.neutral_accuracy,
            avg_time: self.params.neutral_time_secs,
        })
    }

    /// First matching rule wins. A streak rule consumes the streak that fired it.
    pub fn decide(&self, streaks: &mut Streaks, window: &RecentWindow) -> Adjustment {
        let metrics = self.metrics(window);

        if streaks.correct >= self.params.streak_up {
            streaks.correct = 0;
            return Adjustment::level_up(1, format!("{} in a row! Moving up", self.params.streak_up))
                .with_scaffold(ScaffoldChange::Reduce);
        }

        if streaks.wrong >= self.params.streak_down {
            streaks.wrong = 0;
            return Adjustment::level_down(1, "Let's practice at an easier level")
                .with_scaffold(ScaffoldChange::Increase);
        }

        if metrics.accuracy >= self.params.mastery_accuracy
            && metrics.avg_time <= self.params.mastery_time_secs
        {
            return Adjustment::level_up(1, "Fast and accurate, time for a challenge")
                .with_scaffold(ScaffoldChange::Reduce);
        }

        if metrics.accuracy < self.params.struggle_accuracy
            || metrics.avg_time > self.params.struggle_time_secs
        {
            return Adjustment::level_down(1, "Let's slow down and build confidence")
                .with_scaffold(ScaffoldChange::Increase);
        }

        Adjustment::hold("Keep going!")
    }
}

impl Default for SteadyPolicy {
    fn default() -> Self {
        Self::new(SteadyParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::types::{AdjustmentAction, ResultRecord};

    fn window_of(results: &[(bool, f64)]) -> RecentWindow {
        let mut window = RecentWindow::new(5);
        for (correct, time) in results {
            window.push(ResultRecord {
                correct: *correct,
                time: *time,
                skill: None,
                level: 2,
                timestamp: 0,
            });
        }
        window
    }

    #[test]
    fn test_empty_window_uses_neutral_metrics() {
        let policy = SteadyPolicy::default();
        let m = policy.metrics(&RecentWindow::new(5));
        assert_eq!(m.accuracy, 0.5);
        assert_eq!(m.avg_time, 10.0);
    }

    #[test]
    fn test_streak_up_resets_counter() {
        let policy = SteadyPolicy::default();
        let mut streaks = Streaks { correct: 3, wrong: 0 };
        let adj = policy.decide(&mut streaks, &window_of(&[(true, 12.0); 3]));
        assert_eq!(adj.action, AdjustmentAction::LevelUp);
        assert_eq!(adj.scaffold_change, Some(ScaffoldChange::Reduce));
        assert_eq!(streaks.correct, 0);
    }

    #[test]
    fn test_streak_down_resets_counter() {
        let policy = SteadyPolicy::default();
        let mut streaks = Streaks { correct: 0, wrong: 2 };
        let adj = policy.decide(&mut streaks, &window_of(&[(true, 6.0), (false, 6.0), (false, 6.0)]));
        assert_eq!(adj.action, AdjustmentAction::LevelDown);
        assert_eq!(adj.scaffold_change, Some(ScaffoldChange::Increase));
        assert_eq!(streaks.wrong, 0);
    }

    #[test]
    fn test_mastery_metrics() {
        let policy = SteadyPolicy::default();
        let mut streaks = Streaks { correct: 1, wrong: 0 };
        let adj = policy.decide(&mut streaks, &window_of(&[(true, 4.0); 5]));
        assert_eq!(adj.action, AdjustmentAction::LevelUp);
        assert_eq!(streaks.correct, 1);
    }

    #[test]
    fn test_slow_answers_level_down() {
        let policy = SteadyPolicy::default();
        let mut streaks = Streaks { correct: 1, wrong: 0 };
        let adj = policy.decide(&mut streaks, &window_of(&[(true, 25.0), (true, 25.0)]));
        assert_eq!(adj.action, AdjustmentAction::LevelDown);
    }

    #[test]
    fn test_middle_ground_continues() {
        let policy = SteadyPolicy::default();
        let mut streaks = Streaks { correct: 1, wrong: 0 };
        let adj = policy.decide(
            &mut streaks,
            &window_of(&[(true, 8.0), (false, 8.0), (true, 8.0), (true, 8.0), (true, 8.0)]),
        );
        assert_eq!(adj.action, AdjustmentAction::Continue);
        assert!(adj.scaffold_change.is_none());
    }
}
