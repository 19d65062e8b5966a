//! # Aggregation Stage
//! Fuses weighted observations into one `final_score`, and buckets
//! freshness into the coarse recency tier used for tie-breaking.
//! Pure functions, no I/O.

use crate::entity::Signal;
use crate::profile::ScoringProfile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOutcome {
    /// Self-normalizing weighted mean in `[0,1]`; 0 without evidence.
    pub final_score: f64,
    /// True when no observation existed ("no verified evidence").
    pub no_evidence: bool,
}

/// `Σ(score·weight) / Σ(weight)` over present observations.
///
/// The denominator is whatever weight is actually present, so the result is
/// a valid estimate whether one or many observations landed. Weights are
/// strictly positive by collection contract, which keeps the division safe.
pub fn fuse_signals(signals: &[Signal]) -> AggregateOutcome {
    if signals.is_empty() {
        return AggregateOutcome {
            final_score: 0.0,
            no_evidence: true,
        };
    }
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for s in signals {
        weighted_sum += s.score * s.weight;
        total_weight += s.weight;
    }
    let final_score = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };
    AggregateOutcome {
        final_score,
        no_evidence: false,
    }
}

/// Freshness days → tier 3/2/1/0. Tiering, not raw day counts, is what
/// tie-breaking uses: 10 and 25 days ago are the same tier.
pub fn recency_tier(days_ago: i64, profile: &ScoringProfile) -> u8 {
    let [t3, t2, t1] = profile.recency_tier_days;
    if days_ago <= t3 {
        3
    } else if days_ago <= t2 {
        2
    } else if days_ago <= t1 {
        1
    } else {
        0
    }
}
