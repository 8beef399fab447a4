//! Availability filter: is a candidate slot free of every busy interval?
//!
//! Pure functions of their inputs; the wall clock is never consulted here.

use chrono::{DateTime, Utc};
use meetme_common::BusyInterval;

use crate::interval::Interval;

/// `true` if `[start, start + duration_minutes)` overlaps none of `busy`.
pub fn is_available(start: DateTime<Utc>, duration_minutes: i64, busy: &[BusyInterval]) -> bool {
    first_conflict(start, duration_minutes, busy).is_none()
}

/// The first busy interval (in input order) that overlaps the candidate slot.
pub fn first_conflict(
    start: DateTime<Utc>,
    duration_minutes: i64,
    busy: &[BusyInterval],
) -> Option<&BusyInterval> {
    let candidate = Interval::slot(start, duration_minutes);
    busy.iter()
        .find(|interval| candidate.overlaps(&Interval::from(*interval)))
}
