//! Rolling-mean filter over recent mapped volume levels.

use std::collections::VecDeque;

/// Default number of levels averaged per frame
pub const DEFAULT_WINDOW: usize = 5;

/// Fixed-capacity FIFO of recent device-unit levels, emitting their mean.
///
/// The window must be cleared together with any calibration-bounds reset so
/// levels computed under one gesture range never blend with another.
#[derive(Debug, Clone)]
pub struct SmoothingFilter {
    window: VecDeque<f64>,
    capacity: usize,
}

impl SmoothingFilter {
    /// Create an empty filter; a capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a level, evicting the oldest when full, and return the mean.
    pub fn push(&mut self, level: f64) -> f64 {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(level);
        self.mean()
    }

    fn mean(&self) -> f64 {
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SmoothingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
