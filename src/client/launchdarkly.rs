use launchdarkly_server_sdk::{Client, ConfigBuilder, Context, FlagDetailConfig};
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::{EvaluationDetail, FlagClient};
use crate::error::ClientError;

/// `FlagClient` backed by the LaunchDarkly server-side SDK.
pub struct LaunchDarklyClient {
    client: Client,
}

impl LaunchDarklyClient {
    /// Builds and starts the SDK client, then waits up to `start_wait` for the
    /// initial flag sync. A slow or failed sync is logged and the client is
    /// returned anyway; only an invalid SDK configuration is an error.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(sdk_key: &str, start_wait: Duration) -> Result<Self, ClientError> {
        let config = ConfigBuilder::new(sdk_key)
            .build()
            .map_err(|e| ClientError::Build(format!("{:?}", e)))?;

        let client = Client::build(config).map_err(|e| ClientError::Build(format!("{:?}", e)))?;
        client.start_with_default_executor();

        match client.wait_for_initialization(start_wait).await {
            Some(true) => tracing::info!("flag client initialized"),
            Some(false) => tracing::warn!("flag client failed to initialize, serving defaults"),
            None => tracing::warn!(
                wait_secs = start_wait.as_secs(),
                "flag client not initialized before timeout, continuing"
            ),
        }

        Ok(Self { client })
    }
}

fn to_context(value: &Value) -> Result<Context, ClientError> {
    serde_json::from_value(value.clone()).map_err(|e| ClientError::InvalidContext(e.to_string()))
}

fn invalid_context_detail(default: Value) -> EvaluationDetail {
    EvaluationDetail {
        value: default,
        variation_index: None,
        reason: json!({ "kind": "ERROR", "errorKind": "USER_NOT_SPECIFIED" }),
    }
}

/// Flag values from a serialized all-flags state, which interleaves them with
/// `$`-prefixed metadata.
fn flag_values(state: Value) -> Map<String, Value> {
    match state {
        Value::Object(flags) => flags
            .into_iter()
            .filter(|(key, _)| !key.starts_with('$'))
            .collect(),
        _ => Map::new(),
    }
}

impl FlagClient for LaunchDarklyClient {
    fn initialized(&self) -> bool {
        self.client.initialized()
    }

    fn track(&self, key: &str, context: &Value, data: Value) -> Result<(), ClientError> {
        let context = to_context(context)?;
        self.client.track_data(context, key, data)?;
        Ok(())
    }

    fn track_with_metric(
        &self,
        key: &str,
        context: &Value,
        data: Value,
        metric_value: f64,
    ) -> Result<(), ClientError> {
        let context = to_context(context)?;
        self.client.track_metric(context, key, metric_value, data);
        Ok(())
    }

    fn identify(&self, context: &Value) -> Result<(), ClientError> {
        let context = to_context(context)?;
        self.client.identify(context);
        Ok(())
    }

    fn all_flags(&self, context: &Value) -> Map<String, Value> {
        let context = match to_context(context) {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "all flags requested for invalid context");
                return Map::new();
            }
        };

        let state = self.client.all_flags_detail(&context, FlagDetailConfig::new());

        match serde_json::to_value(&state) {
            Ok(state) => flag_values(state),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize flag state");
                Map::new()
            }
        }
    }

    fn evaluate_json(&self, flag_key: &str, context: &Value, default: Value) -> Value {
        match to_context(context) {
            Ok(context) => self.client.json_variation(&context, flag_key, default),
            Err(e) => {
                tracing::debug!(flag_key, error = %e, "evaluation fell back to default");
                default
            }
        }
    }

    fn evaluate_json_with_detail(
        &self,
        flag_key: &str,
        context: &Value,
        default: Value,
    ) -> EvaluationDetail {
        let context = match to_context(context) {
            Ok(context) => context,
            Err(e) => {
                tracing::debug!(flag_key, error = %e, "evaluation fell back to default");
                return invalid_context_detail(default);
            }
        };

        let detail = self
            .client
            .json_variation_detail(&context, flag_key, default.clone());

        let reason = serde_json::to_value(&detail.reason).unwrap_or(Value::Null);
        if reason.get("kind").and_then(Value::as_str) == Some("ERROR") {
            tracing::debug!(flag_key, reason = %reason, "evaluation fell back to default");
        }

        EvaluationDetail {
            value: detail.value.unwrap_or(default),
            variation_index: detail.variation_index.map(|i| i as i64),
            reason,
        }
    }

    fn flush(&self) {
        self.client.flush();
    }

    fn close(&self) {
        self.client.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_user_decodes_as_context() {
        let context = to_context(&json!({ "key": "u1", "name": "Ursula" })).unwrap();
        assert_eq!(context.key(), "u1");
    }

    #[test]
    fn test_context_without_key_is_rejected() {
        let err = to_context(&json!({ "name": "nobody" })).unwrap_err();
        assert!(matches!(err, ClientError::InvalidContext(_)));
    }

    fn offline_client() -> LaunchDarklyClient {
        let config = ConfigBuilder::new("sdk-key").offline(true).build().unwrap();
        LaunchDarklyClient {
            client: Client::build(config).unwrap(),
        }
    }

    #[test]
    fn test_flag_values_strip_metadata() {
        let state = json!({
            "new-checkout": true,
            "banner": { "color": "blue" },
            "$flagsState": { "new-checkout": { "variation": 0, "version": 3 } },
            "$valid": true
        });

        assert_eq!(
            Value::Object(flag_values(state)),
            json!({ "new-checkout": true, "banner": { "color": "blue" } })
        );
        assert!(flag_values(json!(null)).is_empty());
    }

    #[tokio::test]
    async fn test_offline_all_flags_has_no_metadata() {
        let client = offline_client();

        let flags = client.all_flags(&json!({ "key": "u1" }));
        assert!(flags.keys().all(|key| !key.starts_with('$')));
    }

    #[tokio::test]
    async fn test_offline_unknown_flag_detail_returns_default() {
        let client = offline_client();

        let detail = client.evaluate_json_with_detail("flag-x", &json!({ "key": "u1" }), json!(false));
        assert_eq!(detail.value, json!(false));
        assert_eq!(detail.variation_index, None);
        assert_eq!(detail.reason["kind"], "ERROR");

        let value = client.evaluate_json("flag-x", &json!({ "key": "u1" }), json!("fallback"));
        assert_eq!(value, json!("fallback"));
    }

    #[tokio::test]
    async fn test_offline_invalid_context_is_client_error() {
        let client = offline_client();

        assert!(matches!(client.identify(&Value::Null), Err(ClientError::InvalidContext(_))));
        assert!(client.all_flags(&Value::Null).is_empty());
        assert_eq!(
            client.evaluate_json_with_detail("flag-x", &Value::Null, json!(1)).value,
            json!(1)
        );
    }

    #[test]
    fn test_invalid_context_detail_keeps_default() {
        let detail = invalid_context_detail(json!(false));
        assert_eq!(detail.value, json!(false));
        assert_eq!(detail.variation_index, None);
        assert_eq!(detail.reason["kind"], "ERROR");
    }
}
