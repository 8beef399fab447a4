// --- File: crates/meetme_scheduling/src/error.rs ---
use meetme_common::{external_service_error, HttpStatusCode, LinkStoreError, MeetmeError};
use thiserror::Error;

/// Errors raised by the scheduling engine and its HTTP surface.
#[derive(Error, Debug)]
pub enum SchedulingError {
    /// Missing or malformed input. Nothing external was called.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No link with this slug or id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The calendar provider could not list busy intervals.
    #[error("Failed to fetch availability: {0}")]
    AvailabilityFetchFailed(String),

    /// The calendar provider rejected or failed the event creation.
    #[error("Failed to book meeting: {0}")]
    BookingFailed(String),

    /// Another link already uses this slug.
    #[error("Slug already exists: {0}")]
    DuplicateSlug(String),

    /// Re-validation at submission found the slot taken.
    #[error("Requested time slot is no longer available")]
    SlotNoLongerAvailable,

    /// No calendar provider is configured.
    #[error("Calendar service is not configured")]
    CalendarUnavailable,

    /// Invalid scheduling configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The link store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<LinkStoreError> for SchedulingError {
    fn from(err: LinkStoreError) -> Self {
        match err {
            LinkStoreError::DuplicateSlug(slug) => SchedulingError::DuplicateSlug(slug),
            LinkStoreError::Backend(message) => SchedulingError::Storage(message),
        }
    }
}

impl From<SchedulingError> for MeetmeError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::ValidationError(msg) => MeetmeError::ValidationError(msg),
            SchedulingError::NotFound(msg) => MeetmeError::NotFoundError(msg),
            SchedulingError::AvailabilityFetchFailed(msg) => {
                external_service_error("calendar", format!("Failed to fetch availability: {}", msg))
            }
            SchedulingError::BookingFailed(msg) => {
                external_service_error("calendar", format!("Failed to book meeting: {}", msg))
            }
            SchedulingError::DuplicateSlug(slug) => {
                MeetmeError::ConflictError(format!("Slug already exists: {}", slug))
            }
            SchedulingError::SlotNoLongerAvailable => MeetmeError::ConflictError(
                "Requested time slot is no longer available".to_string(),
            ),
            SchedulingError::CalendarUnavailable => {
                MeetmeError::ServiceUnavailable("Calendar service is not configured".to_string())
            }
            SchedulingError::Configuration(msg) => MeetmeError::ConfigError(msg),
            SchedulingError::Storage(msg) => MeetmeError::DatabaseError(msg),
        }
    }
}

impl HttpStatusCode for SchedulingError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulingError::ValidationError(_) => 400,
            SchedulingError::NotFound(_) => 404,
            SchedulingError::AvailabilityFetchFailed(_) => 502,
            SchedulingError::BookingFailed(_) => 502,
            SchedulingError::DuplicateSlug(_) => 409,
            SchedulingError::SlotNoLongerAvailable => 409,
            SchedulingError::CalendarUnavailable => 503,
            SchedulingError::Configuration(_) => 500,
            SchedulingError::Storage(_) => 500,
        }
    }
}
