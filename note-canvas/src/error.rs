//! Error taxonomy for calls to the notes service and the local store.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single request/response exchange with the notes service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: no response was received.
    #[error("network error: {0}")]
    Network(String),

    /// Missing, invalid or expired credential.
    #[error("not authorized: {0}")]
    Auth(String),

    /// The service rejected the request payload.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The referenced note does not exist remotely.
    #[error("note not found: {0}")]
    NotFound(String),

    /// Any other non-success response, or a body that could not be decoded.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The exchange succeeded but its result could not be saved locally,
    /// e.g. a login whose token could not be persisted.
    #[error("local storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Classify a non-success status. `message` is whatever text the service
    /// put in the body.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(message)
            }
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            other => ApiError::Server {
                status: other.as_u16(),
                message,
            },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Failure of the durable local store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("corrupt local store: {0}")]
    Json(#[from] serde_json::Error),
}
