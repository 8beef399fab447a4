// --- File: crates/meetme_scheduling/src/lib.rs ---
pub mod availability;
pub mod booking;
#[cfg(test)]
mod booking_test;
pub mod controller;
pub mod doc;
pub mod error;
pub mod grid;
pub mod handlers;
pub mod interval;
#[cfg(test)]
mod interval_proptest;
#[cfg(test)]
mod interval_test;
pub mod links;
pub mod policy;
pub mod routes;
pub mod store;
#[cfg(test)]
mod test_support;

pub use availability::is_available;
pub use booking::{BookingConfirmation, BookingRequest, BookingSubmissionHandler};
pub use controller::{SelectionState, SlotSelectionController};
pub use error::SchedulingError;
pub use grid::{build_slot_grid, SlotCell, SlotStatus};
pub use handlers::SchedulingState;
pub use interval::{overlaps, slot_end, Interval};
pub use links::{normalize_slug, LinkResolver};
pub use policy::{BusinessRules, PastSlotPolicy, RuleViolation};
pub use routes::{page_routes, routes};
pub use store::InMemoryLinkStore;
