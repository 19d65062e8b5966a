//! CSV writers: performance, value, and price sheets.
//!
//! Each sheet sorts with the leaderboard comparator (rank-scale epsilon)
//! and truncates to the top 100 rows. Fields containing delimiters are
//! quoted with doubled inner quotes.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use std::path::Path;

use crate::entity::ModelEntity;
use crate::ordering::sort_by_score;
use crate::profile::ScoringProfile;
use crate::ranking::overall_listing;

const MAX_ROWS: usize = 100;

/// Overall performance sheet, best-first. Text-capable models only, like
/// every overall view.
pub fn performance_csv(models: &[ModelEntity], profile: &ScoringProfile) -> String {
    let mut sorted: Vec<ModelEntity> =
        overall_listing(models).into_iter().cloned().collect();
    sort_by_score(&mut sorted, profile.tie_epsilon_rank(), |e| e.ranks.overall);

    let mut out = String::from("rank,name,organization,overall,score,coding,confidence,recency_tier\n");
    for (i, e) in sorted.iter().take(MAX_ROWS).enumerate() {
        let r = e.ranks.clamped();
        let _ = writeln!(
            out,
            "{},{},{},{:.2},{:.2},{:.2},{:.1},{}",
            i + 1,
            escape(&e.name),
            escape(&e.organization),
            r.overall,
            (e.final_score * 100.0).clamp(0.0, 100.0),
            r.coding,
            e.confidence,
            e.recency_tier
        );
    }
    out
}

/// Value-for-money sheet. Entities that never earned a positive value
/// score (no evidence) are left out entirely.
pub fn value_csv(models: &[ModelEntity], profile: &ScoringProfile) -> String {
    let mut sorted: Vec<ModelEntity> = models
        .iter()
        .filter(|e| e.ranks.value > 0.0)
        .cloned()
        .collect();
    sort_by_score(&mut sorted, profile.tie_epsilon_rank(), |e| e.ranks.value);

    let mut out = String::from("rank,name,organization,value,score,price_input_1m\n");
    for (i, e) in sorted.iter().take(MAX_ROWS).enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{:.2},{:.2},{:.4}",
            i + 1,
            escape(&e.name),
            escape(&e.organization),
            e.ranks.value,
            (e.final_score * 100.0).clamp(0.0, 100.0),
            e.metrics.price_input_1m
        );
    }
    out
}

/// Price reference sheet, cheapest first. Rows without a known price are
/// dropped; zero means unknown here, not free.
pub fn price_csv(models: &[ModelEntity]) -> String {
    let mut sorted: Vec<&ModelEntity> = models
        .iter()
        .filter(|e| e.metrics.price_input_1m > 0.0)
        .collect();
    sorted.sort_by(|a, b| {
        a.metrics
            .price_input_1m
            .partial_cmp(&b.metrics.price_input_1m)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::from("name,organization,price_input_1m,tokens_per_sec\n");
    for e in sorted.iter().take(MAX_ROWS) {
        let _ = writeln!(
            out,
            "{},{},{:.4},{:.1}",
            escape(&e.name),
            escape(&e.organization),
            e.metrics.price_input_1m,
            e.metrics.tokens_per_sec
        );
    }
    out
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
