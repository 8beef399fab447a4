use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, MeetmeError};

/// Extension trait for MeetmeError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for MeetmeError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for MeetmeError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a `Result<T, E>` into a JSON handler result, mapping the error through `f`.
pub fn map_json_error<T, E, F>(result: Result<T, E>, f: F) -> Result<Json<T>, MeetmeError>
where
    T: serde::Serialize,
    F: FnOnce(E) -> MeetmeError,
{
    result.map(Json).map_err(f)
}
