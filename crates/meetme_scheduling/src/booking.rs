// --- File: crates/meetme_scheduling/src/booking.rs ---
use chrono::{DateTime, Utc};
use meetme_common::{Attendee, DynCalendarService, Meeting, SchedulingLink};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::availability::first_conflict;
use crate::error::SchedulingError;
use crate::interval::slot_end;
use crate::links::{LinkResolver, MAX_DURATION_MINUTES};
use crate::policy::BusinessRules;

/// Duration used when neither a link nor the request says otherwise.
pub const FALLBACK_DURATION_MINUTES: i64 = 30;

#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub name: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: String,
    /// RFC 3339 start of the slot.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "2030-01-01T10:00:00Z"))]
    pub start: String,
    /// Optional RFC 3339 end; must equal start + duration when given.
    pub end: Option<String>,
    pub duration_minutes: Option<i64>,
    /// Link the booking is made through; its duration wins over `durationMinutes`.
    pub slug: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    #[cfg_attr(feature = "openapi", schema(example = "Meeting booked successfully"))]
    pub message: String,
    pub event_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub start: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub end: DateTime<Utc>,
}

/// Validates, re-checks and books a requested slot.
#[derive(Clone)]
pub struct BookingSubmissionHandler {
    calendar: Option<DynCalendarService>,
    links: LinkResolver,
    rules: BusinessRules,
    default_duration_minutes: i64,
}

impl BookingSubmissionHandler {
    pub fn new(
        calendar: Option<DynCalendarService>,
        links: LinkResolver,
        rules: BusinessRules,
        default_duration_minutes: i64,
    ) -> Self {
        Self {
            calendar,
            links,
            rules,
            default_duration_minutes,
        }
    }

    /// Books `request` if its slot is still free and allowed at `now`.
    ///
    /// Field validation happens before any external call. The slot is re-checked against
    /// a fresh busy set, then a single event creation is attempted.
    pub async fn submit(
        &self,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<BookingConfirmation, SchedulingError> {
        let name = request.name.trim();
        let email = request.email.trim();
        let start_raw = request.start.trim();
        if name.is_empty() || email.is_empty() || start_raw.is_empty() {
            return Err(SchedulingError::ValidationError(
                "Missing required fields: name, email and start are required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(SchedulingError::ValidationError(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        let start = parse_instant("start", start_raw)?;

        let link = match request.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => Some(self.links.resolve_by_slug(slug).await?),
            _ => None,
        };
        let duration_minutes = self.resolve_duration(link.as_ref(), request.duration_minutes)?;
        let end = slot_end(start, duration_minutes);

        if let Some(end_raw) = request.end.as_deref() {
            let claimed = parse_instant("end", end_raw)?;
            if claimed != end {
                return Err(SchedulingError::ValidationError(format!(
                    "end {} does not match start + {} minutes ({})",
                    claimed.to_rfc3339(),
                    duration_minutes,
                    end.to_rfc3339()
                )));
            }
        }

        if let Err(violation) = self.rules.evaluate(start, now) {
            return Err(SchedulingError::ValidationError(violation.to_string()));
        }
        if !self.rules.not_in_past(start, now) {
            return Err(SchedulingError::ValidationError(
                "slot starts in the past".to_string(),
            ));
        }

        let calendar = self
            .calendar
            .as_ref()
            .ok_or(SchedulingError::CalendarUnavailable)?;

        let busy = calendar.list_busy(start, end).await.map_err(|e| {
            error!("Re-validation fetch failed for {}: {}", start, e);
            SchedulingError::AvailabilityFetchFailed(e.to_string())
        })?;
        if let Some(conflict) = first_conflict(start, duration_minutes, &busy) {
            warn!(
                "Slot {} - {} was taken by '{}' before booking",
                start, end, conflict.label
            );
            return Err(SchedulingError::SlotNoLongerAvailable);
        }

        let meeting = Meeting {
            start,
            end,
            summary: Some(format!("Meeting with {}", name)),
            description: link.as_ref().map(describe_link),
            attendees: vec![Attendee {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
            }],
        };

        let created = calendar.create_event(meeting).await.map_err(|e| {
            error!("Event creation failed for {}: {}", start, e);
            SchedulingError::BookingFailed(e.to_string())
        })?;

        info!("Booked {} - {} as event {}", start, end, created.event_id);
        Ok(BookingConfirmation {
            message: "Meeting booked successfully".to_string(),
            event_id: created.event_id,
            start,
            end,
        })
    }

    fn resolve_duration(
        &self,
        link: Option<&SchedulingLink>,
        requested: Option<i64>,
    ) -> Result<i64, SchedulingError> {
        if let Some(link) = link {
            return Ok(link.duration_minutes);
        }
        match requested {
            Some(minutes) if minutes <= 0 || minutes > MAX_DURATION_MINUTES => {
                Err(SchedulingError::ValidationError(format!(
                    "durationMinutes must be between 1 and {}",
                    MAX_DURATION_MINUTES
                )))
            }
            Some(minutes) => Ok(minutes),
            None if self.default_duration_minutes > 0 => Ok(self.default_duration_minutes),
            None => Ok(FALLBACK_DURATION_MINUTES),
        }
    }
}

fn describe_link(link: &SchedulingLink) -> String {
    if link.description.is_empty() {
        link.title.clone()
    } else {
        format!("{}\n\n{}", link.title, link.description)
    }
}

/// Parses an RFC 3339 timestamp, naming the field in the error.
pub fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>, SchedulingError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            SchedulingError::ValidationError(format!(
                "Invalid {} '{}', expected an RFC 3339 timestamp",
                field, raw
            ))
        })
}
