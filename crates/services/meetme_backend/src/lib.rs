// --- File: crates/services/meetme_backend/src/lib.rs ---
use axum::{routing::get, Router};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod app_state;
pub mod service_factory;

use app_state::AppState;

/// Directory served under `/static` in debug builds.
pub const STATIC_DIR: &str = "dist";

/// The full application router: the API under `/api`, booking pages at `/{slug}`.
pub fn build_app(state: &AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the MeetMe API!" }))
        .merge(meetme_scheduling::routes(state.scheduling.clone()));

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut app = Router::new()
        .nest("/api", api_router)
        .merge(meetme_scheduling::page_routes(state.scheduling.clone()));

    #[cfg(feature = "openapi")]
    {
        use meetme_scheduling::doc::SchedulingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "MeetMe API",
                version = "0.1.0",
                description = "Scheduling links, availability and booking"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulingApiDoc::openapi());
        info!("📖 Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from {}", STATIC_DIR);
        app = app.nest_service("/static", ServeDir::new(STATIC_DIR));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    app.layer(TraceLayer::new_for_http()).layer(cors)
}
