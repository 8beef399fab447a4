// --- File: crates/meetme_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP error responses
pub mod logging; // Logging setup
pub mod models; // Shared data structures
pub mod services; // Calendar and link store abstractions

pub use error::{external_service_error, validation_error, HttpStatusCode, MeetmeError};
pub use http::{map_json_error, IntoHttpResponse};
pub use logging::{init, init_from_config, init_with_level, log_result};
pub use models::{Attendee, BusyInterval, Meeting, NewSchedulingLink, SchedulingLink};
pub use services::{
    BoxFuture, BoxedCalendarService, BoxedError, CalendarEventResult, CalendarService,
    DynCalendarService, DynLinkStore, LinkStore, LinkStoreError,
};
