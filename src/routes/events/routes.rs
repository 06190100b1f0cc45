use axum::{extract::State, http::StatusCode};

use super::{CustomEventRequest, UserRequest};
use crate::error::ApiError;
use crate::routes::json_body::JsonBody;
use crate::state::AppState;

/// Record a custom event, with a metric value when one is given
pub async fn track(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CustomEventRequest>,
) -> Result<StatusCode, ApiError> {
    match params.metric_value {
        Some(metric_value) => state.client.track_with_metric(
            &params.key,
            &params.user,
            params.data,
            metric_value,
        )?,
        None => state.client.track(&params.key, &params.user, params.data)?,
    }

    tracing::debug!(event_key = %params.key, "tracked event");
    Ok(StatusCode::NO_CONTENT)
}

/// Start delivery of buffered events without waiting for it
pub async fn flush(State(state): State<AppState>) -> StatusCode {
    state.client.flush();
    StatusCode::NO_CONTENT
}

/// Register the given user with the flag client
pub async fn identify(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<UserRequest>,
) -> Result<StatusCode, ApiError> {
    state.client.identify(&params.user)?;
    Ok(StatusCode::NO_CONTENT)
}
