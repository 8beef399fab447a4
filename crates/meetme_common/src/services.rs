//! Service abstractions for the collaborators the scheduling engine talks to.
//!
//! The calendar provider and the link store sit behind these traits so the engine and
//! its handlers can be exercised with in-process doubles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{BusyInterval, Meeting, NewSchedulingLink, SchedulingLink};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl From<String> for BoxedError {
    fn from(message: String) -> Self {
        BoxedError(message.into())
    }
}

/// The external calendar capability.
///
/// Implementations surface provider errors as-is. They never substitute a made-up
/// result for a failed call.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Busy intervals overlapping `[range_start, range_end)`, sorted by start.
    fn list_busy(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error>;

    /// Create a calendar event for a booked meeting.
    fn create_event(&self, meeting: Meeting) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// The calendar service shape shared through application state.
pub type DynCalendarService = Arc<dyn CalendarService<Error = BoxedError>>;

/// Adapts any concrete `CalendarService` into one with a `BoxedError`.
pub struct BoxedCalendarService<S>(pub S);

impl<S> CalendarService for BoxedCalendarService<S>
where
    S: CalendarService,
{
    type Error = BoxedError;

    fn list_busy(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let fut = self.0.list_busy(range_start, range_end);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn create_event(&self, meeting: Meeting) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let fut = self.0.create_event(meeting);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The provider's id for the created event.
    pub event_id: String,
    /// The provider's status for the event, e.g. "confirmed".
    pub status: String,
}

/// Errors a link store can report.
#[derive(Error, Debug)]
pub enum LinkStoreError {
    /// Another link already uses this slug.
    #[error("Slug already exists: {0}")]
    DuplicateSlug(String),
    /// The storage backend failed.
    #[error("Link store backend error: {0}")]
    Backend(String),
}

/// Persistence for scheduling links.
pub trait LinkStore: Send + Sync {
    /// All links, oldest first.
    fn list(&self) -> BoxFuture<'_, Vec<SchedulingLink>, LinkStoreError>;

    /// The link with exactly this slug, if any.
    fn get_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Option<SchedulingLink>, LinkStoreError>;

    /// Persist a new link, assigning its id and creation time.
    ///
    /// Fails with [`LinkStoreError::DuplicateSlug`] if the slug is taken.
    fn create(&self, link: NewSchedulingLink) -> BoxFuture<'_, SchedulingLink, LinkStoreError>;

    /// Remove a link by id. Returns `false` if no such link existed.
    fn delete_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, bool, LinkStoreError>;
}

/// The link store shape shared through application state.
pub type DynLinkStore = Arc<dyn LinkStore>;
