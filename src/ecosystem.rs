//! Per-organization rollups over a scored batch.
//!
//! Aggregates model counts and mean fused scores by organization, plus a
//! composite "share" blending breadth (model count) with quality (mean
//! score). BTreeMap keeps output deterministic across runs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entity::ModelEntity;
use crate::profile::ScoringProfile;

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrgStats {
    pub model_count: usize,
    /// Mean fused score across the org's models, in `[0,1]`.
    pub avg_score: f64,
    /// `count·0.4 + avg·10·0.3` under default weights.
    pub composite_share: f64,
}

/// Roll up a scored batch by organization. Entities with an empty
/// organization are grouped under "Other".
pub fn summarize(entities: &[ModelEntity], profile: &ScoringProfile) -> BTreeMap<String, OrgStats> {
    let mut sums: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for e in entities {
        let org = if e.organization.trim().is_empty() {
            "Other"
        } else {
            e.organization.as_str()
        };
        let entry = sums.entry(org.to_string()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += e.final_score;
    }

    let w = &profile.ecosystem;
    sums.into_iter()
        .map(|(org, (count, score_sum))| {
            let avg_score = score_sum / count as f64;
            let composite_share = count as f64 * w.count_weight
                + avg_score * w.mean_scale * w.mean_weight;
            (
                org,
                OrgStats {
                    model_count: count,
                    avg_score,
                    composite_share,
                },
            )
        })
        .collect()
}
