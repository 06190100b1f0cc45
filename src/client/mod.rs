mod launchdarkly;

#[cfg(test)]
pub mod fake;

use serde_json::{Map, Value};

use crate::error::ClientError;

pub use launchdarkly::LaunchDarklyClient;

/// Result of a detailed flag evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationDetail {
    pub value: Value,
    pub variation_index: Option<i64>,
    /// Why the value was chosen. Opaque to the façade.
    pub reason: Value,
}

/// The capabilities the HTTP layer needs from a flag evaluation client.
///
/// Contexts are passed as raw JSON; implementations convert them into
/// whatever their SDK expects. Evaluation methods never fail: on any
/// evaluation problem they return the caller's default.
pub trait FlagClient: Send + Sync {
    /// Whether the initial flag data sync has completed.
    fn initialized(&self) -> bool;

    fn track(&self, key: &str, context: &Value, data: Value) -> Result<(), ClientError>;

    fn track_with_metric(
        &self,
        key: &str,
        context: &Value,
        data: Value,
        metric_value: f64,
    ) -> Result<(), ClientError>;

    fn identify(&self, context: &Value) -> Result<(), ClientError>;

    /// Evaluated value of every flag for the context, keyed by flag key.
    fn all_flags(&self, context: &Value) -> Map<String, Value>;

    fn evaluate_json(&self, flag_key: &str, context: &Value, default: Value) -> Value;

    fn evaluate_json_with_detail(
        &self,
        flag_key: &str,
        context: &Value,
        default: Value,
    ) -> EvaluationDetail;

    /// Starts delivery of buffered events without waiting for it.
    fn flush(&self);

    /// Flushes pending events and releases network resources.
    fn close(&self);
}
