//! Bounded, newest-first history of prediction outcomes.
//!
//! Held only in memory; restarting the process loses it.

use std::collections::VecDeque;
use std::fmt;

use crate::soil::SoilType;

/// How many prediction records the page shows by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// One crop recommendation together with the soil it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRecord {
    pub label: String,
    pub soil: SoilType,
}

impl PredictionRecord {
    pub fn new(label: impl Into<String>, soil: SoilType) -> Self {
        Self {
            label: label.into(),
            soil,
        }
    }
}

impl fmt::Display for PredictionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Soil: {})", self.label, self.soil)
    }
}

/// Fixed-capacity list of the most recent predictions, newest first.
///
/// `record` inserts at the front and truncates; entries beyond the
/// capacity are dropped oldest-first. There is no other removal path.
#[derive(Debug)]
pub struct PredictionHistory {
    capacity: usize,
    entries: VecDeque<PredictionRecord>,
}

impl PredictionHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, entry: PredictionRecord) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Newest-first read-only copy for rendering.
    pub fn snapshot(&self) -> Vec<PredictionRecord> {
        self.entries.iter().cloned().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PredictionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
