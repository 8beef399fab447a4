// File: crates/meetme_scheduling/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::booking::{BookingConfirmation, BookingRequest};
use crate::grid::{SlotCell, SlotStatus};
use crate::handlers::{
    AdminVerifyRequest, AvailabilityQuery, AvailabilityResponse, CreateLinkRequest,
    SuccessResponse,
};
use meetme_common::{BusyInterval, SchedulingLink};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_availability_handler,
        crate::handlers::book_meeting_handler,
        crate::handlers::list_links_handler,
        crate::handlers::create_link_handler,
        crate::handlers::delete_link_handler,
        crate::handlers::verify_admin_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            AvailabilityResponse,
            BusyInterval,
            SlotCell,
            SlotStatus,
            BookingRequest,
            BookingConfirmation,
            SchedulingLink,
            CreateLinkRequest,
            AdminVerifyRequest,
            SuccessResponse
        )
    ),
    tags(
        (name = "Scheduling", description = "Availability and booking"),
        (name = "Links", description = "Scheduling link management"),
        (name = "Admin", description = "Admin page access")
    ),
    servers(
        (url = "/api", description = "MeetMe API server")
    )
)]
pub struct SchedulingApiDoc;
