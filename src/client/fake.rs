use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{EvaluationDetail, FlagClient};
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Track {
        key: String,
        context: Value,
        data: Value,
        metric_value: Option<f64>,
    },
    Identify(Value),
}

/// In-memory `FlagClient` that serves fixed flag values and records calls.
#[derive(Default)]
pub struct FakeClient {
    pub initialized: AtomicBool,
    pub flags: HashMap<String, (Value, i64)>,
    pub fail_calls: bool,
    pub calls: Mutex<Vec<Call>>,
    pub flushes: AtomicUsize,
    pub closed: AtomicBool,
}

impl FakeClient {
    pub fn with_flag(mut self, key: &str, value: Value, variation_index: i64) -> Self {
        self.flags.insert(key.to_string(), (value, variation_index));
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_calls: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ClientError> {
        if self.fail_calls {
            return Err(ClientError::InvalidContext("missing key".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl FlagClient for FakeClient {
    fn initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn track(&self, key: &str, context: &Value, data: Value) -> Result<(), ClientError> {
        self.record(Call::Track {
            key: key.to_string(),
            context: context.clone(),
            data,
            metric_value: None,
        })
    }

    fn track_with_metric(
        &self,
        key: &str,
        context: &Value,
        data: Value,
        metric_value: f64,
    ) -> Result<(), ClientError> {
        self.record(Call::Track {
            key: key.to_string(),
            context: context.clone(),
            data,
            metric_value: Some(metric_value),
        })
    }

    fn identify(&self, context: &Value) -> Result<(), ClientError> {
        self.record(Call::Identify(context.clone()))
    }

    fn all_flags(&self, _context: &Value) -> Map<String, Value> {
        self.flags
            .iter()
            .map(|(key, (value, _))| (key.clone(), value.clone()))
            .collect()
    }

    fn evaluate_json(&self, flag_key: &str, context: &Value, default: Value) -> Value {
        self.evaluate_json_with_detail(flag_key, context, default).value
    }

    fn evaluate_json_with_detail(
        &self,
        flag_key: &str,
        _context: &Value,
        default: Value,
    ) -> EvaluationDetail {
        match self.flags.get(flag_key) {
            Some((value, index)) => EvaluationDetail {
                value: value.clone(),
                variation_index: Some(*index),
                reason: json!({ "kind": "FALLTHROUGH" }),
            },
            None => EvaluationDetail {
                value: default,
                variation_index: None,
                reason: json!({ "kind": "ERROR", "errorKind": "FLAG_NOT_FOUND" }),
            },
        }
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
