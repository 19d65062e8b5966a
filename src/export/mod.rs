//! # Export Layer
//! Serializable snapshots of a scored batch plus the three writers
//! (JSON, CSV, HTML). Scores cross into display space here: projections
//! clamped to `[0,100]`, floats rounded where the format calls for it.

pub mod csv;
pub mod html;
pub mod json;
pub mod text;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ecosystem::OrgStats;
use crate::engine::BatchReport;
use crate::entity::{Modality, ModelEntity};

/// Full export payload for one run.
#[derive(Debug, Serialize)]
pub struct ExportBundle {
    pub generated_at: String,
    pub model_count: usize,
    pub models: Vec<ModelSnapshot>,
    pub ecosystem: BTreeMap<String, OrgStats>,
}

/// One model flattened for consumers.
#[derive(Debug, Serialize)]
pub struct ModelSnapshot {
    pub name: String,
    pub organization: String,
    pub metrics: MetricsSnapshot,
    pub ranks: RanksSnapshot,
    pub meta: MetaSnapshot,
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    /// Fused quality on the display scale, `[0,100]`.
    pub score: f64,
    pub coding: f64,
    pub creative: f64,
    pub price_input_1m: f64,
    pub tokens_per_sec: f64,
    pub recency_tier: u8,
    pub last_updated_days_ago: i64,
}

#[derive(Debug, Serialize)]
pub struct RanksSnapshot {
    pub overall: f64,
    pub value: f64,
    pub coding: f64,
    pub image: f64,
    pub video: f64,
    pub speed: f64,
    pub confidence: f64,
    pub enterprise: f64,
}

#[derive(Debug, Serialize)]
pub struct MetaSnapshot {
    pub confidence: f64,
    pub confidence_reason: String,
    pub primary_type: String,
    pub is_open_source: bool,
    pub is_enterprise_ready: bool,
    pub is_text: bool,
    pub is_image: bool,
    pub is_video: bool,
}

impl ModelSnapshot {
    pub fn from_entity(e: &ModelEntity) -> Self {
        let r = e.ranks.clamped();
        Self {
            name: e.name.clone(),
            organization: e.organization.clone(),
            metrics: MetricsSnapshot {
                score: (e.final_score * 100.0).clamp(0.0, 100.0),
                coding: (e.metrics.coding_score * 100.0).clamp(0.0, 100.0),
                creative: (e.metrics.creative_score * 100.0).clamp(0.0, 100.0),
                price_input_1m: e.metrics.price_input_1m,
                tokens_per_sec: e.metrics.tokens_per_sec,
                recency_tier: e.recency_tier,
                last_updated_days_ago: e.metrics.last_updated_days_ago,
            },
            ranks: RanksSnapshot {
                overall: r.overall,
                value: e.ranks.value.max(0.0),
                coding: r.coding,
                image: r.image,
                video: r.video,
                speed: r.speed,
                confidence: r.confidence,
                enterprise: r.enterprise,
            },
            meta: MetaSnapshot {
                confidence: e.confidence,
                confidence_reason: e.confidence_reason.clone(),
                primary_type: e.primary_type().to_string(),
                is_open_source: e.metrics.is_open_source,
                is_enterprise_ready: e.metrics.is_enterprise_ready,
                is_text: e.has_modality(Modality::Text),
                is_image: e.has_modality(Modality::Image),
                is_video: e.has_modality(Modality::Video),
            },
        }
    }
}

impl ExportBundle {
    pub fn from_report(report: &BatchReport) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            model_count: report.models.len(),
            models: report.models.iter().map(ModelSnapshot::from_entity).collect(),
            ecosystem: report.ecosystem.clone(),
        }
    }
}
