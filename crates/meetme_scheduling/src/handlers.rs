// File: crates/meetme_scheduling/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use meetme_common::{
    log_result, map_json_error, validation_error, BusyInterval, DynCalendarService, DynLinkStore,
    MeetmeError, NewSchedulingLink, SchedulingLink,
};
use meetme_config::{AppConfig, PastSlotPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::booking::{parse_instant, BookingConfirmation, BookingRequest, BookingSubmissionHandler};
use crate::error::SchedulingError;
use crate::grid::{build_slot_grid, SlotCell};
use crate::interval::{slot_end, Interval};
use crate::links::LinkResolver;
use crate::policy::BusinessRules;

// Shared state for the scheduling handlers
#[derive(Clone)]
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub rules: BusinessRules,
    pub calendar: Option<DynCalendarService>,
    pub links: LinkResolver,
    pub booking: BookingSubmissionHandler,
}

impl SchedulingState {
    /// Wires the engine from configuration and the chosen collaborators.
    ///
    /// `calendar` is `None` when no provider is configured; availability and booking
    /// then answer 503 instead of inventing data.
    pub fn new(
        config: Arc<AppConfig>,
        calendar: Option<DynCalendarService>,
        store: DynLinkStore,
    ) -> Result<Self, SchedulingError> {
        let rules = BusinessRules::from_config(&config.scheduling)?;
        let links = LinkResolver::new(store);
        let booking = BookingSubmissionHandler::new(
            calendar.clone(),
            links.clone(),
            rules.clone(),
            config.scheduling.default_duration_minutes,
        );
        Ok(Self {
            config,
            rules,
            calendar,
            links,
            booking,
        })
    }
}

// --- Request / response types ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// RFC 3339 start of the range
    #[cfg_attr(feature = "openapi", schema(example = "2030-01-01T00:00:00Z"))]
    pub start: Option<String>,
    /// RFC 3339 end of the range (exclusive)
    #[cfg_attr(feature = "openapi", schema(example = "2030-01-08T00:00:00Z"))]
    pub end: Option<String>,
    /// When given, the slot grid for this link is included
    #[cfg_attr(feature = "openapi", schema(example = "intro-call"))]
    pub slug: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub busy: Vec<BusyInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<SlotCell>>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i64>,
    pub slug: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AdminVerifyRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

/// Everything a front end needs to render the public booking page of a link.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingPage {
    pub link: SchedulingLink,
    pub time_zone: String,
    pub business_hours: BusinessHours,
    pub working_days: Vec<String>,
    pub slot_step_minutes: i64,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub past_slot_policy: PastSlotPolicy,
}

// --- Handlers ---

/// Busy intervals for a range, plus the slot grid when a link slug is given.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Busy intervals and optional slot grid", body = AvailabilityResponse),
        (status = 400, description = "Missing or invalid range"),
        (status = 404, description = "Unknown link slug"),
        (status = 502, description = "Calendar provider failed"),
        (status = 503, description = "No calendar configured")
    ),
    tag = "Scheduling"
))]
pub async fn get_availability_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, MeetmeError> {
    let (Some(start_raw), Some(end_raw)) = (query.start.as_deref(), query.end.as_deref()) else {
        return Err(validation_error(
            "start and end query parameters are required",
        ));
    };
    let start = parse_instant("start", start_raw)?;
    let end = parse_instant("end", end_raw)?;
    if end <= start {
        return Err(validation_error("end must be after start"));
    }
    let max_days = state.config.scheduling.max_range_days;
    if end - start > Duration::days(max_days) {
        return Err(validation_error(format!(
            "range may span at most {} days",
            max_days
        )));
    }

    let link = match query.slug.as_deref() {
        Some(slug) if !slug.trim().is_empty() => Some(state.links.resolve_by_slug(slug).await?),
        _ => None,
    };

    let calendar = state
        .calendar
        .as_ref()
        .ok_or(SchedulingError::CalendarUnavailable)?;
    // Grid slots may start just before `end` and run past it.
    let fetch_end = link
        .as_ref()
        .map_or(end, |link| slot_end(end, link.duration_minutes));
    let fetched = calendar.list_busy(start, fetch_end).await.map_err(|e| {
        error!("Error fetching busy intervals: {}", e);
        SchedulingError::AvailabilityFetchFailed(e.to_string())
    })?;
    info!(
        "Fetched {} busy intervals for {} - {}",
        fetched.len(),
        start,
        fetch_end
    );

    let (duration_minutes, slots) = match link {
        Some(link) => {
            let slots = build_slot_grid(
                start,
                end,
                link.duration_minutes,
                state.config.scheduling.slot_step_minutes,
                &fetched,
                &state.rules,
                Utc::now(),
            );
            (Some(link.duration_minutes), Some(slots))
        }
        None => (None, None),
    };

    let range = Interval::new(start, end);
    let busy = fetched
        .into_iter()
        .filter(|b| range.overlaps(&Interval::from(b)))
        .collect();

    Ok(Json(AvailabilityResponse {
        busy,
        duration_minutes,
        slots,
    }))
}

/// Books a meeting after re-validating the slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/book-meeting",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Meeting booked", body = BookingConfirmation),
        (status = 400, description = "Missing fields or slot outside business rules"),
        (status = 404, description = "Unknown link slug"),
        (status = 409, description = "Slot no longer available"),
        (status = 502, description = "Calendar provider failed"),
        (status = 503, description = "No calendar configured")
    ),
    tag = "Scheduling"
))]
pub async fn book_meeting_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>, MeetmeError> {
    let confirmation = log_result(
        state.booking.submit(payload, Utc::now()).await,
        "Meeting booked",
        "Booking failed",
    )?;
    Ok(Json(confirmation))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/links",
    responses((status = 200, description = "All scheduling links", body = [SchedulingLink])),
    tag = "Links"
))]
pub async fn list_links_handler(
    State(state): State<Arc<SchedulingState>>,
) -> Result<Json<Vec<SchedulingLink>>, MeetmeError> {
    map_json_error(state.links.list().await, MeetmeError::from)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/links",
    request_body = CreateLinkRequest,
    responses(
        (status = 201, description = "Link created", body = SchedulingLink),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "Links"
))]
pub async fn create_link_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<SchedulingLink>), MeetmeError> {
    let (Some(title), Some(slug), Some(duration_minutes)) =
        (payload.title, payload.slug, payload.duration_minutes)
    else {
        return Err(validation_error(
            "Missing required fields: title, slug and durationMinutes are required",
        ));
    };
    let created = state
        .links
        .create(NewSchedulingLink {
            title,
            description: payload.description.unwrap_or_default(),
            duration_minutes,
            slug,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/links/{id}",
    params(("id" = String, Path, description = "Id of the link to delete")),
    responses(
        (status = 200, description = "Link deleted", body = SuccessResponse),
        (status = 404, description = "No link with this id")
    ),
    tag = "Links"
))]
pub async fn delete_link_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, MeetmeError> {
    state.links.delete(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Checks the admin page password against the configured secret.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/verify",
    request_body = AdminVerifyRequest,
    responses(
        (status = 200, description = "Password accepted", body = SuccessResponse),
        (status = 401, description = "Invalid password"),
        (status = 500, description = "Admin secret not configured")
    ),
    tag = "Admin"
))]
pub async fn verify_admin_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<AdminVerifyRequest>,
) -> Result<Json<SuccessResponse>, MeetmeError> {
    let secret = state
        .config
        .admin
        .as_ref()
        .and_then(|admin| admin.page_secret.as_deref())
        .filter(|secret| !secret.is_empty())
        .ok_or_else(|| {
            error!("Admin page secret is not configured");
            MeetmeError::ConfigError("Admin secret is not configured".to_string())
        })?;

    if constant_time_eq(payload.password.as_bytes(), secret.as_bytes()) {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        warn!("Rejected admin verification attempt");
        Err(MeetmeError::AuthError("Invalid password".to_string()))
    }
}

/// The public booking page model for a link.
#[axum::debug_handler]
pub async fn booking_page_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(slug): Path<String>,
) -> Result<Json<BookingPage>, MeetmeError> {
    let link = state.links.resolve_by_slug(&slug).await?;
    let rules = &state.rules;
    Ok(Json(BookingPage {
        link,
        time_zone: rules.time_zone().name().to_string(),
        business_hours: BusinessHours {
            start_hour: rules.start_hour(),
            end_hour: rules.end_hour(),
        },
        working_days: rules.working_days().iter().map(|d| d.to_string()).collect(),
        slot_step_minutes: state.config.scheduling.slot_step_minutes,
        past_slot_policy: rules.past_policy(),
    }))
}
