//! # Signal Collector
//!
//! Turns a raw record into weighted benchmark observations. Which fields are
//! recognized, and with what trust weight, is a configurable table:
//!
//! - Loads from JSON config (`fields` array).
//! - Built-in `default_seed()`: the primary GPQA benchmark at weight 0.50
//!   plus a fallback aggregate at 0.40, consulted only when no primary
//!   signal landed.
//! - Values present but outside `[0,1]` are clamped at collection time.
//! - Non-positive or unparsable values are discarded: absence of evidence,
//!   not evidence of a zero score.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::entity::Signal;
use crate::ingest::types::RawModelRecord;

pub const DEFAULT_SIGNALS_PATH: &str = "config/signals.json";
pub const ENV_SIGNALS_PATH: &str = "CROSSBENCH_SIGNALS_PATH";

/// One recognized benchmark field and its trust weight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkField {
    /// Key in the raw record, e.g. "gpqa_score".
    pub field: String,
    /// Source label carried on the resulting signal.
    pub label: String,
    /// Trust weight, strictly positive.
    pub weight: f64,
    /// Only consulted when no earlier field produced a signal.
    #[serde(default)]
    pub fallback_only: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalConfig {
    #[serde(default)]
    pub fields: Vec<BenchmarkField>,
}

impl SignalConfig {
    /// Built-in seed mirroring the upstream leaderboard contract.
    pub fn default_seed() -> Self {
        Self {
            fields: vec![
                BenchmarkField {
                    field: "gpqa_score".into(),
                    label: "ZeroEval GPQA".into(),
                    weight: 0.50,
                    fallback_only: false,
                },
                BenchmarkField {
                    field: "average_score".into(),
                    label: "Aggregate Average".into(),
                    weight: 0.40,
                    fallback_only: true,
                },
            ],
        }
    }

    /// Load from a JSON file; falls back to `default_seed()` on any error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str::<Self>(&s)
                .map(Self::sanitized)
                .unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Env var + default path + seed fallback.
    pub fn load() -> Self {
        let path = std::env::var(ENV_SIGNALS_PATH)
            .unwrap_or_else(|_| DEFAULT_SIGNALS_PATH.to_string());
        if Path::new(&path).exists() {
            Self::load_from_file(path)
        } else {
            Self::default_seed()
        }
    }

    /// Drop entries that can never yield a valid signal (weight must be >0).
    fn sanitized(mut self) -> Self {
        self.fields.retain(|f| f.weight > 0.0 && !f.field.is_empty());
        self
    }
}

/// Collect weighted observations from one record.
///
/// Fields are consulted in table order. A `fallback_only` field is skipped
/// once any signal has been collected, so the fallback aggregate never
/// dilutes a primary benchmark.
pub fn collect_signals(record: &RawModelRecord, config: &SignalConfig) -> Vec<Signal> {
    let mut out = Vec::new();
    for entry in &config.fields {
        if entry.fallback_only && !out.is_empty() {
            continue;
        }
        let Some(raw) = record.number(&entry.field) else {
            continue;
        };
        if raw <= 0.0 {
            // "no evidence", not a zero score
            continue;
        }
        out.push(Signal {
            source: entry.label.clone(),
            score: raw.clamp(0.0, 1.0),
            weight: entry.weight,
        });
    }
    out
}
