// --- File: crates/meetme_gcal/src/service.rs ---
//! Google Calendar implementation of [`CalendarService`].
//!
//! Busy intervals are read from the event list of one calendar. Cancelled events and
//! events marked as free ("transparent") do not block time. All-day events block their
//! dates in the host's time zone.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use google_calendar3::api::{Event, EventAttendee, EventDateTime};
use meetme_common::{BoxFuture, BusyInterval, CalendarEventResult, CalendarService, Meeting};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::HubType;

/// Calendar used when the config does not name one.
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
    calendar_id: String,
    time_zone: Tz,
}

impl GoogleCalendarService {
    pub fn new(calendar_hub: Arc<HubType>, calendar_id: Option<String>) -> Self {
        Self {
            calendar_hub,
            calendar_id: calendar_id.unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string()),
            time_zone: Tz::UTC,
        }
    }

    /// Sets the zone all-day events are placed in. Defaults to UTC.
    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    fn list_busy(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        Box::pin(async move {
            let mut events = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut call = self
                    .calendar_hub
                    .events()
                    .list(&self.calendar_id)
                    .time_min(range_start)
                    .time_max(range_end)
                    .single_events(true)
                    .order_by("startTime");
                if let Some(token) = page_token.as_deref() {
                    call = call.page_token(token);
                }
                let (_response, page) = call.doit().await?;

                events.extend(page.items.unwrap_or_default());
                match page.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }

            let busy = busy_from_events(events, range_start, range_end, self.time_zone);
            debug!(
                "Calendar {} has {} busy intervals in {} - {}",
                self.calendar_id,
                busy.len(),
                range_start,
                range_end
            );
            Ok(busy)
        })
    }

    fn create_event(&self, meeting: Meeting) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        Box::pin(async move {
            let new_event = event_from_meeting(meeting)?;

            let (_response, created_event) = self
                .calendar_hub
                .events()
                .insert(new_event, &self.calendar_id)
                .send_updates("all")
                .doit()
                .await?;

            let event_id = created_event.id.unwrap_or_default();
            info!("Created calendar event {} in {}", event_id, self.calendar_id);
            Ok(CalendarEventResult {
                event_id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

/// Turns listed events into busy intervals sorted by start.
///
/// All-day events run from local midnight to local midnight in `time_zone`. Events that
/// do not overlap `[range_start, range_end)` are dropped.
pub fn busy_from_events(
    events: Vec<Event>,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    time_zone: Tz,
) -> Vec<BusyInterval> {
    let mut busy: Vec<BusyInterval> = events
        .into_iter()
        .filter(|event| event.status.as_deref() != Some("cancelled"))
        .filter(|event| event.transparency.as_deref() != Some("transparent"))
        .filter_map(|event| {
            let start = event.start.as_ref().and_then(|w| event_instant(w, time_zone));
            let end = event.end.as_ref().and_then(|w| event_instant(w, time_zone));
            match (start, end) {
                (Some(start), Some(end)) if start < end => Some(BusyInterval::new(
                    start,
                    end,
                    event.summary.unwrap_or_else(|| "Busy".to_string()),
                )),
                _ => {
                    warn!("Skipping event {:?} with missing or invalid times", event.id);
                    None
                }
            }
        })
        .filter(|b| b.start < range_end && range_start < b.end)
        .collect();
    busy.sort_by_key(|b| b.start);
    busy
}

// All-day events carry a date only.
fn event_instant(when: &EventDateTime, time_zone: Tz) -> Option<DateTime<Utc>> {
    when.date_time
        .or_else(|| when.date.map(|date| start_of_day(date, time_zone)))
}

// Midnight skipped by a DST change falls back to the UTC reading of the wall clock.
fn start_of_day(date: NaiveDate, time_zone: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    time_zone
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// The event inserted for a booked meeting. Times are stored in UTC.
pub fn event_from_meeting(meeting: Meeting) -> Result<Event, GcalServiceError> {
    if meeting.end <= meeting.start {
        return Err(GcalServiceError::InvalidEvent(
            "End time must be after start time".to_string(),
        ));
    }

    let attendees: Vec<EventAttendee> = meeting
        .attendees
        .into_iter()
        .filter(|a| a.email.is_some())
        .map(|a| EventAttendee {
            email: a.email,
            display_name: a.name,
            ..Default::default()
        })
        .collect();

    Ok(Event {
        summary: meeting.summary,
        description: meeting.description,
        start: Some(EventDateTime {
            date_time: Some(meeting.start),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(meeting.end),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        attendees: if attendees.is_empty() {
            None
        } else {
            Some(attendees)
        },
        ..Default::default()
    })
}
