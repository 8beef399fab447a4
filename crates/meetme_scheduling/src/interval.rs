//! Half-open time intervals and the single overlap rule used everywhere.

use chrono::{DateTime, Duration, Utc};
use meetme_common::BusyInterval;
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The slot interval `[start, slot_end(start, duration_minutes))`.
    pub fn slot(start: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self::new(start, slot_end(start, duration_minutes))
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        overlaps(self, other)
    }

    /// `other` lies entirely within `self`.
    pub fn covers(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl From<&BusyInterval> for Interval {
    fn from(busy: &BusyInterval) -> Self {
        Self::new(busy.start, busy.end)
    }
}

/// `true` iff `a` and `b` share at least one instant.
///
/// Touching endpoints do not overlap: a slot may end exactly when a busy interval starts.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && b.start < a.end
}

/// End of a slot starting at `start`. Selection, grid building and booking all derive
/// slot ends through this function.
pub fn slot_end(start: DateTime<Utc>, duration_minutes: i64) -> DateTime<Utc> {
    start + Duration::minutes(duration_minutes)
}
