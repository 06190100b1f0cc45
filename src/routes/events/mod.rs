pub mod routes;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub user: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventRequest {
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub data: Value,
    pub metric_value: Option<f64>,
}
