use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    initialized: bool,
}

/// Report whether the flag client has finished its initial sync
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        initialized: state.client.initialized(),
    })
}
