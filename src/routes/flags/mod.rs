pub mod routes;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalFeatureRequest {
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub default_value: Value,
    pub detail: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalFeatureResponse {
    pub key: String,
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Value>,
}
