use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use meetme_backend::{app_state::AppState, build_app, service_factory::MeetmeServiceFactory};
use meetme_common::{LinkStore, MeetmeError};
use meetme_config::AppConfig;
use meetme_scheduling::InMemoryLinkStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_state() -> AppState {
    let config = Arc::new(AppConfig::default());
    let factory = MeetmeServiceFactory::with_services(None, Arc::new(InMemoryLinkStore::new()));
    AppState::new(config, &factory).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_api_root_answers() {
    let app = build_app(&test_state());
    let response = app
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Welcome to the MeetMe API!");
}

#[tokio::test]
async fn test_created_link_is_served_as_booking_page() {
    let state = test_state();

    let response = build_app(&state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/links")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "title": "Coffee", "slug": "coffee", "durationMinutes": 20 })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = build_app(&state)
        .oneshot(Request::builder().uri("/coffee").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["link"]["durationMinutes"], 20);
}

#[tokio::test]
async fn test_availability_without_calendar_is_unavailable() {
    let response = build_app(&test_state())
        .oneshot(
            Request::builder()
                .uri("/api/availability?start=2030-01-01T00:00:00Z&end=2030-01-02T00:00:00Z")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 503);
}

#[tokio::test]
async fn test_factory_without_database_uses_memory_store() {
    let config = Arc::new(AppConfig::default());
    let factory = MeetmeServiceFactory::new(config).await.unwrap();

    assert!(factory.calendar_service().is_none());
    assert!(factory.link_store().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_factory_rejects_unknown_time_zone() {
    let mut config = AppConfig::default();
    config.scheduling.time_zone = "Mars/Olympus_Mons".to_string();

    let result = MeetmeServiceFactory::new(Arc::new(config)).await;
    assert!(matches!(result, Err(MeetmeError::ConfigError(_))));
}
