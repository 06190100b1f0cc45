use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use super::{EvalFeatureRequest, EvalFeatureResponse};
use crate::routes::events::UserRequest;
use crate::routes::json_body::JsonBody;
use crate::state::AppState;

/// Evaluate every flag for the given user
pub async fn all_flags(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<UserRequest>,
) -> Json<Map<String, Value>> {
    Json(state.client.all_flags(&params.user))
}

/// Evaluate a single flag, falling back to the caller's default on any problem
///
/// With `detail` set the response also carries the variation index (when one
/// was selected) and the evaluation reason
pub async fn eval(
    State(state): State<AppState>,
    Path(key): Path<String>,
    JsonBody(params): JsonBody<EvalFeatureRequest>,
) -> Json<EvalFeatureResponse> {
    let response = if params.detail.unwrap_or(false) {
        let detail =
            state
                .client
                .evaluate_json_with_detail(&key, &params.user, params.default_value);

        EvalFeatureResponse {
            key,
            result: detail.value,
            variation_index: detail.variation_index,
            reason: Some(detail.reason),
        }
    } else {
        let result = state
            .client
            .evaluate_json(&key, &params.user, params.default_value);

        EvalFeatureResponse {
            key,
            result,
            variation_index: None,
            reason: None,
        }
    };

    Json(response)
}
