use std::collections::VecDeque;

use crate::adaptive::types::ResultRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMetrics {
    pub accuracy: f64,
    pub avg_time: f64,
}

/// Bounded FIFO of the most recent answers.
#[derive(Debug, Clone)]
pub struct RecentWindow {
    capacity: usize,
    history: VecDeque<ResultRecord>,
}

impl RecentWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            history: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn push(&mut self, record: ResultRecord) {
        self.history.push_back(record);

        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.history.iter()
    }

    pub fn to_vec(&self) -> Vec<ResultRecord> {
        self.history.iter().cloned().collect()
    }

    /// `None` when the window is empty.
    pub fn metrics(&self) -> Option<WindowMetrics> {
        Self::metrics_of(self.history.iter())
    }

    pub fn first(&self, n: usize) -> Option<WindowMetrics> {
        Self::metrics_of(self.history.iter().take(n))
    }

    pub fn last(&self, n: usize) -> Option<WindowMetrics> {
        let skip = self.history.len().saturating_sub(n);
        Self::metrics_of(self.history.iter().skip(skip))
    }

    fn metrics_of<'a>(records: impl Iterator<Item = &'a ResultRecord>) -> Option<WindowMetrics> {
        let (count, correct, total_time) = records.fold((0usize, 0usize, 0.0f64), |acc, r| {
            (acc.0 + 1, acc.1 + usize::from(r.correct), acc.2 + r.time)
        });
        if count == 0 {
            return None;
        }
        Some(WindowMetrics {
            accuracy: correct as f64 / count as f64,
            avg_time: total_time / count as f64,
        })
    }
}
