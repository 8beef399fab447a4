use std::fmt;
use thiserror::Error;

/// The error type every MeetMe crate converts into at the HTTP edge.
///
/// Each crate keeps its own error enum and implements `From<ItsError> for MeetmeError`.
#[derive(Error, Debug)]
pub enum MeetmeError {
    /// Missing or malformed input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The resource already exists (e.g. a slug is taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// An upstream service (calendar provider) failed
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// A capability is not configured on this server
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authentication failed
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Persistence failed
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Maps an error to the HTTP status code it should be reported with.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for MeetmeError {
    fn status_code(&self) -> u16 {
        match self {
            MeetmeError::ValidationError(_) => 400,
            MeetmeError::NotFoundError(_) => 404,
            MeetmeError::ConflictError(_) => 409,
            MeetmeError::ExternalServiceError { .. } => 502,
            MeetmeError::ServiceUnavailable(_) => 503,
            MeetmeError::ConfigError(_) => 500,
            MeetmeError::AuthError(_) => 401,
            MeetmeError::DatabaseError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for MeetmeError {
    fn from(err: serde_json::Error) -> Self {
        MeetmeError::ValidationError(err.to_string())
    }
}

impl From<meetme_config::ConfigError> for MeetmeError {
    fn from(err: meetme_config::ConfigError) -> Self {
        MeetmeError::ConfigError(err.to_string())
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> MeetmeError {
    MeetmeError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> MeetmeError {
    MeetmeError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
