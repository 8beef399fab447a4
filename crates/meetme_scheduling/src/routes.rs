// --- File: crates/meetme_scheduling/src/routes.rs ---

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    book_meeting_handler, booking_page_handler, create_link_handler, delete_link_handler,
    get_availability_handler, list_links_handler, verify_admin_handler, SchedulingState,
};

/// API routes, meant to be nested under `/api`.
pub fn routes(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/book-meeting", post(book_meeting_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{id}", delete(delete_link_handler))
        .route("/admin/verify", post(verify_admin_handler))
        .with_state(state)
}

/// The public `/{slug}` booking page route, served at the site root.
pub fn page_routes(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/{slug}", get(booking_page_handler))
        .with_state(state)
}
