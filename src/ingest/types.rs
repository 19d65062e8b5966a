// src/ingest/types.rs
use anyhow::{anyhow, Result};
use serde_json::Value;

/// One raw model record as handed over by a provider.
///
/// Collaborator payloads are noisy: numeric fields may arrive as native
/// numbers or numeric strings, and any field may be missing or null. The
/// accessors here are lenient per-field so one malformed value never sinks
/// the record, let alone the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RawModelRecord {
    raw: Value,
}

impl RawModelRecord {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Parse a provider payload. The top level must be a JSON array;
    /// each element becomes one record, whatever its shape.
    pub fn from_payload(payload: &str) -> Result<Vec<Self>> {
        let v: Value =
            serde_json::from_str(payload).map_err(|e| anyhow!("invalid JSON payload: {e}"))?;
        match v {
            Value::Array(items) => Ok(items.into_iter().map(Self::new).collect()),
            other => Err(anyhow!(
                "invalid payload format: expected array, got {}",
                json_type_name(&other)
            )),
        }
    }

    /// Required identity field; `None` when missing, null, or empty.
    pub fn name(&self) -> Option<&str> {
        match self.raw.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Organization with the contractual "Unknown" default.
    pub fn organization(&self) -> String {
        match self.raw.get("organization") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => "Unknown".to_string(),
        }
    }

    /// Numeric field accepted as a native number or a numeric string.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.raw.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// String-array field; non-string elements are dropped.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.raw.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(|v| v.as_str())
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait::async_trait]
pub trait ModelProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawModelRecord>>;
    fn name(&self) -> &'static str;
}
