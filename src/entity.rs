//! Core domain types for one evaluated model.
//!
//! A `ModelEntity` is created once a raw record passes minimal validation,
//! then passes through Aggregation → Enrichment → Confidence → Ranking in
//! strict order, each stage filling only its own derived fields. After
//! ranking it is read-only and lives for the duration of one run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Modality tags. Not mutually exclusive; a multimodal LLM carries several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Video,
}

/// One weighted benchmark observation from a named source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// E.g. "ZeroEval GPQA", "Aggregate Average".
    pub source: String,
    /// Normalized score in `[0,1]`, clamped at collection time.
    pub score: f64,
    /// Trust weight, strictly positive.
    pub weight: f64,
}

/// Supplementary attributes attached by the enrichment stage.
/// Read-only to the engine once attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceMetrics {
    /// Reasoning proxy; mirrors the fused score after enrichment.
    pub reasoning_score: f64,
    pub coding_score: f64,
    pub creative_score: f64,
    /// Context window as a fraction of a 200k-token window, in `[0,1]`.
    pub context_norm: f64,
    /// USD per 1M input tokens. Zero means free/unknown.
    pub price_input_1m: f64,
    pub tokens_per_sec: f64,
    pub is_open_source: bool,
    pub is_enterprise_ready: bool,
    /// Days since the model was last verified/updated.
    pub last_updated_days_ago: i64,
    /// Coarse two-level tiers reflecting the enterprise flag.
    pub org_maturity: f64,
    pub uptime_sla: f64,
}

/// The eight independent 0–100 ranking projections.
///
/// Stored on their natural scale; clamping to `[0,100]` happens at export.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankScores {
    pub overall: f64,
    pub value: f64,
    pub coding: f64,
    pub image: f64,
    pub video: f64,
    pub speed: f64,
    pub confidence: f64,
    pub enterprise: f64,
}

impl RankScores {
    /// Copy with every projection clamped into `[0,100]`.
    pub fn clamped(&self) -> Self {
        let c = |x: f64| x.clamp(0.0, 100.0);
        Self {
            overall: c(self.overall),
            value: c(self.value),
            coding: c(self.coding),
            image: c(self.image),
            video: c(self.video),
            speed: c(self.speed),
            confidence: c(self.confidence),
            enterprise: c(self.enterprise),
        }
    }
}

/// One evaluated model with its signals and derived scores.
#[derive(Debug, Clone)]
pub struct ModelEntity {
    /// Non-empty, unique within a batch.
    pub name: String,
    /// Free text; "Unknown" when the record carried none.
    pub organization: String,
    pub modalities: BTreeSet<Modality>,
    /// Built once by the signal collector, immutable afterward.
    pub signals: Vec<Signal>,
    pub metrics: PerformanceMetrics,

    /// Weight-fused aggregate of `signals`, in `[0,1]`; 0 without evidence.
    pub final_score: f64,
    /// Coarse freshness bucket 0–3 used for tie-breaking.
    pub recency_tier: u8,
    /// Reliability estimate in `[10,99]`; exactly 10 without signals.
    pub confidence: f64,
    /// Display-only justification. Never feeds back into any number.
    pub confidence_reason: String,
    pub ranks: RankScores,
}

impl ModelEntity {
    pub fn new(name: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            organization: organization.into(),
            modalities: BTreeSet::new(),
            signals: Vec::new(),
            metrics: PerformanceMetrics::default(),
            final_score: 0.0,
            recency_tier: 0,
            confidence: 0.0,
            confidence_reason: String::new(),
            ranks: RankScores::default(),
        }
    }

    pub fn has_modality(&self, m: Modality) -> bool {
        self.modalities.contains(&m)
    }

    /// Primary display type: Video > Image-only > Multimodal > Text.
    pub fn primary_type(&self) -> &'static str {
        if self.has_modality(Modality::Video) {
            "Video"
        } else if self.has_modality(Modality::Image) && self.modalities.len() == 1 {
            "Image"
        } else if self.modalities.len() > 1 {
            "Multimodal"
        } else {
            "Text"
        }
    }
}
