//! # Enrichment
//! Attaches supplementary attributes to an entity: modality tags, pricing,
//! coding/creative sub-scores, context size, throughput, freshness, and the
//! enterprise/open-source flags with their tier constants.
//!
//! Prefers explicit payload fields; falls back to name/organization
//! heuristics when the payload is silent. Runs after aggregation (the
//! proxy estimates lean on `final_score`) and before confidence.

use chrono::Utc;

use crate::entity::{Modality, ModelEntity};
use crate::ingest::types::RawModelRecord;
use crate::profile::ScoringProfile;

const IMAGE_GEN_HINTS: &[&str] = &["midjourney", "stable diffusion", "dall-e", "imagen"];
const VIDEO_GEN_HINTS: &[&str] = &[
    "sora",
    "runway",
    "gen-2",
    "gen-3",
    "pika",
    "animatediff",
    "stable video",
    "kling",
    "video generation",
];
const MULTIMODAL_HINTS: &[&str] = &[
    "gpt-4", "gpt-5", "claude 3", "claude 4", "gemini", "pixtral", "qvq", "vision", "-vl",
    "diffusion",
];
const OPEN_SOURCE_HINTS: &[&str] = &["llama", "mistral", "qwen", "falcon"];
const ENTERPRISE_ORGS: &[&str] = &["openai", "anthropic", "google", "microsoft"];

pub fn enrich(e: &mut ModelEntity, record: &RawModelRecord, profile: &ScoringProfile) {
    let name = e.name.to_lowercase();
    let org = e.organization.to_lowercase();

    detect_modalities(e, record, &name);

    // Pricing: explicit field first (per-token values converted to per-1M),
    // then a name-class fallback.
    e.metrics.price_input_1m = match record.number("input_price") {
        Some(p) if p > 0.0 && p < 1.0 => p * 1_000_000.0,
        Some(p) => p,
        None => {
            if name.contains("gpt-4") {
                10.0
            } else if name.contains("flash") {
                0.25
            } else {
                0.0
            }
        }
    };

    e.metrics.is_open_source = OPEN_SOURCE_HINTS.iter().any(|h| name.contains(h));
    e.metrics.is_enterprise_ready = ENTERPRISE_ORGS.contains(&org.as_str());
    let tiers = if e.metrics.is_enterprise_ready {
        profile.enterprise_tiers
    } else {
        profile.standard_tiers
    };
    e.metrics.org_maturity = tiers.org_maturity;
    e.metrics.uptime_sla = tiers.uptime_sla;

    // Coding: dedicated field, then HumanEval, then a proxy estimate.
    // Proxy estimates are capped at 1.0 here, at the estimation site.
    e.metrics.coding_score = record
        .number("coding_score")
        .or_else(|| record.number("humaneval"))
        .unwrap_or_else(|| {
            let factor = if name.contains("code") { 1.05 } else { 0.85 };
            (e.final_score * factor).min(1.0)
        });

    // The fused score stands in as the reasoning proxy.
    e.metrics.reasoning_score = e.final_score;

    e.metrics.creative_score = match record.number("creative_score") {
        Some(v) => v.min(1.0),
        None => {
            let factor = if e.has_modality(Modality::Image) || e.has_modality(Modality::Video) {
                1.1
            } else if name.contains("gpt-4") || name.contains("claude") || name.contains("gemini") {
                0.95
            } else {
                0.80
            };
            (e.final_score * factor).min(1.0)
        }
    };

    e.metrics.context_norm = match record.number("context_length") {
        Some(len) => (len / profile.context_window_tokens).min(1.0),
        None => {
            if name.contains("128k") || name.contains("200k") {
                0.8
            } else {
                0.5
            }
        }
    };

    e.metrics.tokens_per_sec = record
        .number("throughput")
        .or_else(|| record.number("tokens_per_second"))
        .unwrap_or_else(|| {
            if name.contains("turbo") {
                120.0
            } else if name.contains("flash") {
                150.0
            } else if name.contains("mini") {
                100.0
            } else {
                50.0
            }
        });

    e.metrics.last_updated_days_ago = freshness_days(record, &name);
}

fn detect_modalities(e: &mut ModelEntity, record: &RawModelRecord, name: &str) {
    let declared = record.string_list("modalities");
    if !declared.is_empty() {
        for m in declared {
            match m.to_lowercase().as_str() {
                "image" | "vision" => {
                    e.modalities.insert(Modality::Image);
                }
                "video" => {
                    e.modalities.insert(Modality::Video);
                }
                "text" => {
                    e.modalities.insert(Modality::Text);
                }
                _ => {}
            }
        }
        if e.modalities.is_empty() {
            e.modalities.insert(Modality::Text);
        }
        return;
    }

    // Name-based detection when the payload carries no modality list.
    if IMAGE_GEN_HINTS.iter().any(|h| name.contains(h)) {
        e.modalities.insert(Modality::Image);
        e.modalities.insert(Modality::Text);
    } else if VIDEO_GEN_HINTS.iter().any(|h| name.contains(h)) {
        e.modalities.insert(Modality::Video);
        e.modalities.insert(Modality::Text);
    } else if MULTIMODAL_HINTS.iter().any(|h| name.contains(h))
        || (name.contains("qwen") && name.contains("vl"))
        || name.contains("llama 3.2 11b")
        || name.contains("llama 3.2 90b")
        || (name.contains("grok")
            && (name.contains("-2") || name.contains("-3") || name.contains("-4")))
    {
        e.modalities.insert(Modality::Image);
        e.modalities.insert(Modality::Text);
    } else {
        e.modalities.insert(Modality::Text);
    }
}

/// Days since last verification. Parses `release_date`/`updated_at` as
/// RFC 3339 or `YYYY-MM-DD`; falls back to a name-year heuristic.
fn freshness_days(record: &RawModelRecord, name: &str) -> i64 {
    for key in ["release_date", "updated_at"] {
        if let Some(s) = record.text(key) {
            if let Some(days) = days_since_date(s) {
                return days;
            }
        }
    }
    if name.contains("2025") {
        15
    } else if name.contains("2024") {
        90
    } else if name.contains("2023") {
        365
    } else {
        180
    }
}

fn days_since_date(s: &str) -> Option<i64> {
    let date = chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()?;
    let today = Utc::now().date_naive();
    Some((today - date).num_days().max(0))
}
