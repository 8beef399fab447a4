// --- File: crates/meetme_scheduling/src/grid.rs ---
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use meetme_common::BusyInterval;
use serde::Serialize;

use crate::availability::is_available;
use crate::interval::slot_end;
use crate::policy::BusinessRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Busy,
    Past,
}

/// One clickable cell of the booking calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotCell {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub start: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub end: DateTime<Utc>,
    pub status: SlotStatus,
}

/// Lays out candidate slot starts over `[range_start, range_end)` and classifies each one.
///
/// Starts are generated every `step_minutes` of local wall-clock time from the opening
/// hour of each working day until closing. Local times skipped by a DST change produce no
/// cell; ambiguous ones use the earlier instant. Cells are ordered by start.
pub fn build_slot_grid(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration_minutes: i64,
    step_minutes: i64,
    busy: &[BusyInterval],
    rules: &BusinessRules,
    now: DateTime<Utc>,
) -> Vec<SlotCell> {
    if duration_minutes <= 0 || step_minutes <= 0 || range_end <= range_start {
        return Vec::new();
    }

    let tz = rules.time_zone();
    let first_day = range_start.with_timezone(&tz).date_naive();
    let last_day = range_end.with_timezone(&tz).date_naive();
    let step = Duration::minutes(step_minutes);

    let mut cells = Vec::new();
    for day in first_day.iter_days().take_while(|d| *d <= last_day) {
        let Some(open) = NaiveTime::from_hms_opt(rules.start_hour(), 0, 0) else {
            continue;
        };
        let close = day.and_time(NaiveTime::MIN) + Duration::hours(i64::from(rules.end_hour()));
        let mut local = day.and_time(open);

        while local < close {
            if let Some(start) = tz
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
            {
                if start >= range_start
                    && start < range_end
                    && rules.is_working_day(start)
                    && rules.within_business_hours(start)
                {
                    cells.push(classify(start, duration_minutes, busy, rules, now));
                }
            }
            local += step;
        }
    }
    cells
}

fn classify(
    start: DateTime<Utc>,
    duration_minutes: i64,
    busy: &[BusyInterval],
    rules: &BusinessRules,
    now: DateTime<Utc>,
) -> SlotCell {
    let status = if !rules.not_in_past(start, now) {
        SlotStatus::Past
    } else if !is_available(start, duration_minutes, busy) {
        SlotStatus::Busy
    } else {
        SlotStatus::Available
    };
    SlotCell {
        start,
        end: slot_end(start, duration_minutes),
        status,
    }
}
