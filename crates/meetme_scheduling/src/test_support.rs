// Shared doubles and helpers for the unit tests in this crate.

use chrono::{DateTime, TimeZone, Utc};
use meetme_common::{
    BoxFuture, BoxedError, BusyInterval, CalendarEventResult, CalendarService, Meeting,
    SchedulingLink,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::interval::{overlaps, Interval};

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn busy(start: DateTime<Utc>, end: DateTime<Utc>) -> BusyInterval {
    BusyInterval::new(start, end, "Busy")
}

pub fn link(slug: &str, duration_minutes: i64) -> SchedulingLink {
    SchedulingLink {
        id: format!("id-{}", slug),
        title: format!("Talk about {}", slug),
        description: String::new(),
        duration_minutes,
        slug: slug.to_string(),
        created_at: utc(2029, 12, 1, 0, 0),
    }
}

/// Calendar double backed by a fixed busy set. Records every call.
#[derive(Default)]
pub struct StubCalendar {
    busy: Mutex<Vec<BusyInterval>>,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub created: Mutex<Vec<Meeting>>,
}

impl StubCalendar {
    pub fn with_busy(busy: Vec<BusyInterval>) -> Self {
        Self {
            busy: Mutex::new(busy),
            ..Default::default()
        }
    }

    pub fn set_busy(&self, busy: Vec<BusyInterval>) {
        *self.busy.lock().unwrap() = busy;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<Meeting> {
        self.created.lock().unwrap().clone()
    }
}

impl CalendarService for StubCalendar {
    type Error = BoxedError;

    fn list_busy(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        Box::pin(async move {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(BoxedError::from("calendar offline".to_string()));
            }
            let range = Interval::new(range_start, range_end);
            Ok(self
                .busy
                .lock()
                .unwrap()
                .iter()
                .filter(|b| overlaps(&Interval::from(*b), &range))
                .cloned()
                .collect())
        })
    }

    fn create_event(&self, meeting: Meeting) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        Box::pin(async move {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(BoxedError::from("insert rejected".to_string()));
            }
            let mut created = self.created.lock().unwrap();
            created.push(meeting);
            Ok(CalendarEventResult {
                event_id: format!("evt-{}", created.len()),
                status: "confirmed".to_string(),
            })
        })
    }
}
