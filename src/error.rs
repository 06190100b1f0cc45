use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::num::ParseIntError;
use thiserror::Error;

/// Startup configuration errors. Any of these stops the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SDK_KEY is required")]
    MissingSdkKey,

    #[error("PORT must be a valid u16 number, got {value:?}: {source}")]
    InvalidPort { value: String, source: ParseIntError },

    #[error("START_WAIT_SECS must be a whole number of seconds, got {value:?}: {source}")]
    InvalidStartWait { value: String, source: ParseIntError },
}

/// Errors reported by the flag client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build flag client: {0}")]
    Build(String),

    #[error("invalid user context: {0}")]
    InvalidContext(String),

    #[error("failed to serialize event data: {0}")]
    EventData(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// The request body could not be read at all (e.g. it exceeded the size limit).
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Body { status, .. } => *status,
            ApiError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }
        (status, self.to_string()).into_response()
    }
}
