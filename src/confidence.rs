//! # Confidence Stage
//! Pure, testable logic that maps a fully-enriched entity → reliability
//! estimate. Computed exactly once, after enrichment; no earlier estimate
//! exists anywhere in the pipeline.
//!
//! The formula starts from a base and applies, in order: signal-count
//! bonus, recency bonus, versatility bonus, quality tier, consistency
//! penalty, enterprise bonus, then clamps into `[min,max]`. An entity
//! without signals skips the formula entirely and is pinned at the floor.

use crate::entity::ModelEntity;
use crate::profile::ScoringProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceOutcome {
    pub score: f64,
    /// Display-only justification; never feeds back into any number.
    pub reason: String,
}

pub fn assess(e: &ModelEntity, profile: &ScoringProfile) -> ConfidenceOutcome {
    if e.signals.is_empty() {
        return ConfidenceOutcome {
            score: profile.confidence_no_evidence,
            reason: "No Verified Signals".to_string(),
        };
    }

    let mut conf = profile.confidence_base;
    let mut reasons: Vec<&str> = Vec::new();

    // 1) Evidence volume, unbounded by count.
    conf += e.signals.len() as f64 * profile.signal_bonus;

    // 2) Recency.
    let [full_days, half_days] = profile.recency_confidence_days;
    if e.metrics.last_updated_days_ago <= full_days {
        conf += profile.recency_bonus;
        reasons.push("Recent Verification");
    } else if e.metrics.last_updated_days_ago <= half_days {
        conf += profile.recency_bonus * 0.5;
    }

    // 3) Versatility: strong at multiple tasks, or multimodal.
    let t = profile.versatile_sub_score_min;
    let versatile = (e.metrics.coding_score > t && e.metrics.creative_score > t)
        || e.modalities.len() > 1;
    if versatile {
        conf += profile.versatility_bonus;
        reasons.push("Multi-Category Verified");
    }

    // 4) Quality tier: first matching branch only, high to low.
    let mut tier_hit = false;
    for tier in &profile.quality_tiers {
        if e.final_score > tier.min {
            conf += tier.bonus;
            tier_hit = true;
            break;
        }
    }
    if !tier_hit && e.final_score < profile.low_quality_floor {
        conf -= profile.low_quality_penalty;
    }

    // 5) Consistency: RMS deviation of each signal from the *fused* score
    // (not the arithmetic mean of signals). Penalizes disagreement with
    // the weighted consensus.
    conf -= deviation_from_fused(e) * profile.variance_penalty;

    // 6) Enterprise readiness.
    if e.metrics.is_enterprise_ready {
        conf += profile.enterprise_bonus;
    }

    if e.signals.len() >= 3 {
        reasons.push("High Consensus");
    }

    ConfidenceOutcome {
        score: conf.clamp(profile.confidence_min, profile.confidence_max),
        reason: reasons.join(", "),
    }
}

/// `sqrt(mean((signal_score − final_score)²))` over all signals.
fn deviation_from_fused(e: &ModelEntity) -> f64 {
    if e.signals.is_empty() {
        return 0.0;
    }
    let mean = e.final_score;
    let sq_sum: f64 = e.signals.iter().map(|s| (s.score - mean).powi(2)).sum();
    (sq_sum / e.signals.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Modality, Signal};

    fn entity_with(signals: &[(f64, f64)], final_score: f64) -> ModelEntity {
        let mut e = ModelEntity::new("m", "o");
        e.signals = signals
            .iter()
            .map(|&(score, weight)| Signal {
                source: "t".into(),
                score,
                weight,
            })
            .collect();
        e.final_score = final_score;
        e.metrics.last_updated_days_ago = 365; // no recency bonus by default
        e.modalities.insert(Modality::Text);
        e
    }

    #[test]
    fn no_signals_pins_confidence_at_floor() {
        let e = entity_with(&[], 0.0);
        let out = assess(&e, &ScoringProfile::default());
        assert_eq!(out.score, 10.0);
        assert_eq!(out.reason, "No Verified Signals");
    }

    #[test]
    fn worked_two_signal_oracle() {
        // Signals (0.90, w 0.50) and (0.80, w 0.40); no recency, no
        // versatility, no enterprise. Exact oracle:
        //   50 + 2·10 + 15 − 50·sqrt(((0.90−f)² + (0.80−f)²)/2)
        let f = (0.90 * 0.50 + 0.80 * 0.40) / 0.90;
        let e = entity_with(&[(0.90, 0.50), (0.80, 0.40)], f);
        let out = assess(&e, &ScoringProfile::default());

        let dev = (((0.90 - f).powi(2) + (0.80 - f).powi(2)) / 2.0).sqrt();
        let expected = 50.0 + 20.0 + 15.0 - 50.0 * dev;
        assert!(
            (out.score - expected).abs() < 1e-9,
            "got {}, want {}",
            out.score,
            expected
        );
        // And it stays inside the contractual band.
        assert!((10.0..=99.0).contains(&out.score));
    }

    #[test]
    fn enterprise_flag_adds_exactly_its_bonus() {
        let f = 0.5;
        let mut e = entity_with(&[(0.5, 0.5)], f);
        let base = assess(&e, &ScoringProfile::default()).score;
        e.metrics.is_enterprise_ready = true;
        let with = assess(&e, &ScoringProfile::default()).score;
        assert!((with - base - 5.0).abs() < 1e-9);
    }

    #[test]
    fn recency_full_and_half_bonus() {
        let p = ScoringProfile::default();
        let f = 0.5;
        let mut e = entity_with(&[(0.5, 0.5)], f);

        e.metrics.last_updated_days_ago = 200;
        let stale = assess(&e, &p).score;

        e.metrics.last_updated_days_ago = 60;
        let mid = assess(&e, &p).score;
        assert!((mid - stale - 2.5).abs() < 1e-9);

        e.metrics.last_updated_days_ago = 10;
        let fresh = assess(&e, &p).score;
        assert!((fresh - stale - 5.0).abs() < 1e-9);
        assert!(assess(&e, &p).reason.contains("Recent Verification"));
    }

    #[test]
    fn versatility_via_sub_scores_or_modalities() {
        let p = ScoringProfile::default();
        let f = 0.5;

        let mut e = entity_with(&[(0.5, 0.5)], f);
        let plain = assess(&e, &p).score;

        e.metrics.coding_score = 0.8;
        e.metrics.creative_score = 0.8;
        let skilled = assess(&e, &p).score;
        assert!((skilled - plain - 10.0).abs() < 1e-9);

        let mut e2 = entity_with(&[(0.5, 0.5)], f);
        e2.modalities.insert(Modality::Image);
        let multi = assess(&e2, &p).score;
        assert!((multi - plain - 10.0).abs() < 1e-9);
        assert!(assess(&e2, &p).reason.contains("Multi-Category Verified"));
    }

    #[test]
    fn quality_tiers_are_mutually_exclusive() {
        let p = ScoringProfile::default();
        // Single perfectly-consistent signal: deviation 0.
        let hi = assess(&entity_with(&[(0.86, 0.5)], 0.86), &p).score;
        let mid = assess(&entity_with(&[(0.76, 0.5)], 0.76), &p).score;
        let low = assess(&entity_with(&[(0.66, 0.5)], 0.66), &p).score;
        let none = assess(&entity_with(&[(0.50, 0.5)], 0.50), &p).score;
        let poor = assess(&entity_with(&[(0.30, 0.5)], 0.30), &p).score;
        assert_eq!(hi - none, 15.0);
        assert_eq!(mid - none, 10.0);
        assert_eq!(low - none, 5.0);
        assert_eq!(none - poor, 10.0);
    }

    #[test]
    fn disagreement_with_consensus_is_penalized() {
        let p = ScoringProfile::default();
        // Same fused score, but one set is spread out.
        let tight = entity_with(&[(0.6, 0.5), (0.6, 0.5)], 0.6);
        let spread = entity_with(&[(0.9, 0.5), (0.3, 0.5)], 0.6);
        assert!(assess(&tight, &p).score > assess(&spread, &p).score);
    }

    #[test]
    fn many_signals_push_into_clamp_ceiling() {
        let p = ScoringProfile::default();
        let sigs: Vec<(f64, f64)> = (0..8).map(|_| (0.9, 0.5)).collect();
        let e = entity_with(&sigs, 0.9);
        let out = assess(&e, &p);
        assert_eq!(out.score, 99.0);
        assert!(out.reason.contains("High Consensus"));
    }

    #[test]
    fn confidence_never_leaves_band() {
        let p = ScoringProfile::default();
        // Hostile combination: terrible score, huge spread.
        let e = entity_with(&[(0.9, 0.1), (0.05, 2.0)], 0.09);
        let out = assess(&e, &p);
        assert!((10.0..=99.0).contains(&out.score), "{}", out.score);
    }
}
