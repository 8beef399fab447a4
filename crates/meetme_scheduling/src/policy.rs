//! Business rules a slot start must satisfy: a working day, inside business hours,
//! and (depending on [`PastSlotPolicy`]) not in the past.
//!
//! All calendar arithmetic happens in the configured zone.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use meetme_config::SchedulingConfig;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub use meetme_config::PastSlotPolicy;

use crate::error::SchedulingError;

/// Which rule rejected a slot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    NotWorkingDay,
    OutsideBusinessHours,
    InPast,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RuleViolation::NotWorkingDay => "slot is not on a working day",
            RuleViolation::OutsideBusinessHours => "slot starts outside business hours",
            RuleViolation::InPast => "slot starts in the past",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusinessRules {
    time_zone: Tz,
    working_days: Vec<Weekday>,
    start_hour: u32,
    end_hour: u32,
    past_policy: PastSlotPolicy,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            time_zone: Tz::UTC,
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            start_hour: 9,
            end_hour: 17,
            past_policy: PastSlotPolicy::Block,
        }
    }
}

impl BusinessRules {
    pub fn new(
        time_zone: Tz,
        working_days: Vec<Weekday>,
        start_hour: u32,
        end_hour: u32,
        past_policy: PastSlotPolicy,
    ) -> Result<Self, SchedulingError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(SchedulingError::Configuration(format!(
                "business hours must satisfy start < end <= 24, got [{}, {})",
                start_hour, end_hour
            )));
        }
        Ok(Self {
            time_zone,
            working_days,
            start_hour,
            end_hour,
            past_policy,
        })
    }

    /// Builds the rules from the `[scheduling]` config section.
    pub fn from_config(config: &SchedulingConfig) -> Result<Self, SchedulingError> {
        let time_zone = Tz::from_str(&config.time_zone).map_err(|_| {
            SchedulingError::Configuration(format!("unknown time zone '{}'", config.time_zone))
        })?;

        let working_days = config
            .working_days
            .iter()
            .map(|day| {
                Weekday::from_str(day).map_err(|_| {
                    SchedulingError::Configuration(format!("unknown weekday '{}'", day))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            time_zone,
            working_days,
            config.business_start_hour,
            config.business_end_hour,
            config.past_slot_policy,
        )
    }

    pub fn with_past_policy(mut self, past_policy: PastSlotPolicy) -> Self {
        self.past_policy = past_policy;
        self
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn past_policy(&self) -> PastSlotPolicy {
        self.past_policy
    }

    /// The local weekday of `start` is a working day.
    pub fn is_working_day(&self, start: DateTime<Utc>) -> bool {
        let local = start.with_timezone(&self.time_zone);
        self.working_days.contains(&local.weekday())
    }

    /// The local hour of `start` lies in `[start_hour, end_hour)`. Only the start is checked.
    pub fn within_business_hours(&self, start: DateTime<Utc>) -> bool {
        let hour = start.with_timezone(&self.time_zone).hour();
        hour >= self.start_hour && hour < self.end_hour
    }

    /// `start` is not before `now`.
    pub fn not_in_past(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        start >= now
    }

    /// First violated rule for a selection or booking at `start`.
    ///
    /// Under [`PastSlotPolicy::GrayOnly`] past starts are accepted.
    pub fn evaluate(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), RuleViolation> {
        if !self.is_working_day(start) {
            return Err(RuleViolation::NotWorkingDay);
        }
        if !self.within_business_hours(start) {
            return Err(RuleViolation::OutsideBusinessHours);
        }
        if self.past_policy == PastSlotPolicy::Block && !self.not_in_past(start, now) {
            return Err(RuleViolation::InPast);
        }
        Ok(())
    }
}
