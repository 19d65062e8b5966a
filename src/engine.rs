//! # Scoring Engine
//! Drives one record through the fixed stage order and a whole batch
//! through validation and dedup. Pure with respect to I/O: records in,
//! scored entities out.

use std::collections::HashSet;

use metrics::counter;

use crate::aggregate::{fuse_signals, recency_tier};
use crate::confidence;
use crate::ecosystem::{self, OrgStats};
use crate::enrich::enrich;
use crate::entity::ModelEntity;
use crate::ingest::normalize_name;
use crate::ingest::types::RawModelRecord;
use crate::profile::ScoringProfile;
use crate::ranking::compute_ranks;
use crate::signals::{collect_signals, SignalConfig};

/// Everything one scoring run produced.
#[derive(Debug)]
pub struct BatchReport {
    /// Scored entities in input order (callers sort per projection).
    pub models: Vec<ModelEntity>,
    /// Records dropped for a missing or empty name.
    pub skipped: usize,
    /// Records dropped as duplicates of an earlier name.
    pub duplicates: usize,
    pub ecosystem: std::collections::BTreeMap<String, OrgStats>,
}

/// Score one validated record. Stage order is load-bearing: enrichment
/// proxies read the fused score, the recency tier reads enriched freshness,
/// confidence reads everything before it, ranking reads everything.
pub fn score_record(
    name: String,
    record: &RawModelRecord,
    signal_config: &SignalConfig,
    profile: &ScoringProfile,
) -> ModelEntity {
    let mut e = ModelEntity::new(name, normalize_name(&record.organization()));

    e.signals = collect_signals(record, signal_config);
    let fused = fuse_signals(&e.signals);
    e.final_score = fused.final_score;
    if fused.no_evidence {
        tracing::debug!(model = %e.name, "no benchmark signals, scoring at zero");
    }

    enrich(&mut e, record, profile);
    e.recency_tier = recency_tier(e.metrics.last_updated_days_ago, profile);

    let conf = confidence::assess(&e, profile);
    e.confidence = conf.score;
    e.confidence_reason = conf.reason;

    e.ranks = compute_ranks(&e, profile);
    e
}

/// Validate, dedup, and score a whole batch.
///
/// Names are normalized before the uniqueness check, so `"GPT&nbsp;4"` and
/// `"GPT 4"` collide. First occurrence wins; later duplicates are dropped
/// and counted. Entities without signals are kept (they score zero) so the
/// output roster matches the upstream roster.
pub fn score_batch(
    records: &[RawModelRecord],
    signal_config: &SignalConfig,
    profile: &ScoringProfile,
) -> BatchReport {
    let mut models = Vec::with_capacity(records.len());
    let mut seen: HashSet<String> = HashSet::new();
    let mut skipped = 0usize;
    let mut duplicates = 0usize;

    for record in records {
        let name = match record.name() {
            Some(n) => normalize_name(n),
            None => String::new(),
        };
        if name.is_empty() {
            skipped += 1;
            tracing::debug!("skipping record without a usable name");
            continue;
        }
        if !seen.insert(name.to_lowercase()) {
            duplicates += 1;
            tracing::debug!(model = %name, "skipping duplicate record");
            continue;
        }
        models.push(score_record(name, record, signal_config, profile));
    }

    counter!("engine_models_scored_total").increment(models.len() as u64);
    if skipped + duplicates > 0 {
        tracing::info!(skipped, duplicates, "dropped records during validation");
    }

    let ecosystem = ecosystem::summarize(&models, profile);
    BatchReport {
        models,
        skipped,
        duplicates,
        ecosystem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(v: serde_json::Value) -> Vec<RawModelRecord> {
        RawModelRecord::from_payload(&v.to_string()).unwrap()
    }

    #[test]
    fn batch_validates_dedups_and_scores() {
        let recs = records(json!([
            {"name": "Model A", "organization": "Acme", "gpqa_score": 0.8},
            {"name": "  "},
            {"name": "model a", "gpqa_score": 0.9},
            {"name": "Model B", "organization": "Zeta", "gpqa_score": 0.6},
            {"no_name": true}
        ]));
        let report = score_batch(&recs, &SignalConfig::default_seed(), &ScoringProfile::default());
        assert_eq!(report.models.len(), 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.duplicates, 1);
        // First occurrence wins the dedup.
        assert!((report.models[0].final_score - 0.8).abs() < 1e-12);
        assert_eq!(report.ecosystem.len(), 2);
    }

    #[test]
    fn normalized_names_collide_in_dedup() {
        let recs = records(json!([
            {"name": "GPT&nbsp;X", "gpqa_score": 0.8},
            {"name": "GPT  X", "gpqa_score": 0.5}
        ]));
        let report = score_batch(&recs, &SignalConfig::default_seed(), &ScoringProfile::default());
        assert_eq!(report.models.len(), 1);
        assert_eq!(report.models[0].name, "GPT X");
        assert_eq!(report.duplicates, 1);
    }

    #[test]
    fn signalless_entities_are_kept_at_zero() {
        let recs = records(json!([{"name": "Mystery", "organization": "Acme"}]));
        let report = score_batch(&recs, &SignalConfig::default_seed(), &ScoringProfile::default());
        assert_eq!(report.models.len(), 1);
        let m = &report.models[0];
        assert_eq!(m.final_score, 0.0);
        assert_eq!(m.confidence, 10.0);
        assert_eq!(m.confidence_reason, "No Verified Signals");
        // Zero quality still leaves enterprise/speed axes nonzero.
        assert!(m.ranks.enterprise > 0.0);
    }

    #[test]
    fn stage_order_recency_uses_enriched_freshness() {
        // A date-stamped record must land in the freshest tier, which only
        // happens when tiering runs after enrichment.
        let ten_days_ago = (chrono::Utc::now().date_naive() - chrono::Duration::days(10))
            .format("%Y-%m-%d")
            .to_string();
        let recs = records(json!([
            {"name": "Fresh", "gpqa_score": 0.7, "release_date": ten_days_ago}
        ]));
        let report = score_batch(&recs, &SignalConfig::default_seed(), &ScoringProfile::default());
        assert_eq!(report.models[0].recency_tier, 3);
    }

    #[test]
    fn full_pipeline_matches_worked_example() {
        // Two-signal walkthrough: primary 0.90 at 0.50 plus a second
        // benchmark 0.80 at 0.40, fused to 0.8556.
        let cfg = SignalConfig {
            fields: vec![
                crate::signals::BenchmarkField {
                    field: "gpqa_score".into(),
                    label: "ZeroEval GPQA".into(),
                    weight: 0.50,
                    fallback_only: false,
                },
                crate::signals::BenchmarkField {
                    field: "mmlu_score".into(),
                    label: "MMLU".into(),
                    weight: 0.40,
                    fallback_only: false,
                },
            ],
        };
        let recs = records(json!([
            {"name": "Oracle", "organization": "Indie", "gpqa_score": 0.90, "mmlu_score": 0.80}
        ]));
        let report = score_batch(&recs, &cfg, &ScoringProfile::default());
        let m = &report.models[0];
        assert!((m.final_score - 0.8555555555555556).abs() < 1e-12);

        // Freshness falls back to 180 days: tier 1, no recency bonus.
        assert_eq!(m.recency_tier, 1);
        let f = m.final_score;
        let dev = (((0.90 - f).powi(2) + (0.80 - f).powi(2)) / 2.0).sqrt();
        let expected_conf = 50.0 + 20.0 + 15.0 - 50.0 * dev;
        assert!((m.confidence - expected_conf).abs() < 1e-9);
    }
}
