// --- File: crates/meetme_common/src/models.rs ---
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A slug-addressed booking configuration owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SchedulingLink {
    #[cfg_attr(feature = "openapi", schema(example = "9b2f6d0e-5a51-4a0c-8c3e-7d2b1c0f4e11"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Intro call"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub duration_minutes: i64,
    #[cfg_attr(feature = "openapi", schema(example = "intro-call"))]
    pub slug: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub created_at: DateTime<Utc>,
}

/// A link as submitted by the host, before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewSchedulingLink {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: i64,
    pub slug: String,
}

/// An externally reported occupied period. Half-open: `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BusyInterval {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub start: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub end: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "Busy"))]
    pub label: String,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Attendee {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A booked meeting as it is handed to the calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Meeting {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub start: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub end: DateTime<Utc>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}
