//! Rolling window of the most recent samples.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// Keeps the last `capacity` samples and answers summary queries over them.
///
/// Every query on an empty window returns `0.0`.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples: VecDeque<f64>,
    capacity: usize,
    sum: f64,
    total: u64,
}

impl SlidingWindow {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
            total: 0,
        }
    }

    /// Add a sample, evicting the oldest one when the window is full.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() >= self.capacity {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
                trace!(evicted = old, "window full");
            }
        }
        self.samples.push_back(value);
        self.sum += value;
        self.total += 1;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Samples pushed since creation or the last [`clear`](Self::clear),
    /// evicted ones included.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.sum = 0.0;
        self.total = 0;
    }

    /// Samples in the window, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f64
        }
    }

    pub fn min(&self) -> f64 {
        self.samples.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// Population variance.
    pub fn variance(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let squares: f64 = self.samples.iter().map(|v| (v - mean).powi(2)).sum();
        squares / self.samples.len() as f64
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// The `q`-quantile (`0.0..=1.0`), interpolating linearly between the
    /// two closest ranks. Out-of-range or NaN `q` yields `0.0`.
    pub fn quantile(&self, q: f64) -> f64 {
        if self.samples.is_empty() || !(0.0..=1.0).contains(&q) {
            return 0.0;
        }

        let sorted = self.sorted();
        let rank = q * (sorted.len() - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;
        let weight = rank - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * weight
    }

    pub fn median(&self) -> f64 {
        self.quantile(0.5)
    }

    pub fn snapshot(&self) -> WindowSummary {
        WindowSummary {
            count: self.samples.len(),
            total: self.total,
            sum: self.sum,
            mean: self.mean(),
            min: self.min(),
            max: self.max(),
            std_dev: self.std_dev(),
            p50: self.quantile(0.5),
            p95: self.quantile(0.95),
            p99: self.quantile(0.99),
        }
    }

    fn sorted(&self) -> Vec<f64> {
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Extend<f64> for SlidingWindow {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Point-in-time summary of a [`SlidingWindow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Samples currently in the window.
    pub count: usize,
    /// Samples ever pushed.
    pub total: u64,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}
