//! # Ranking Projections
//! Projects one entity onto eight independent 0–100 leaderboard axes.
//! Every projection reads the same frozen inputs, so their computation
//! order is irrelevant and no projection feeds another.
//!
//! Off-domain policy is explicit: a model without the relevant modality is
//! either excluded from an axis outright (image) or scaled down but kept
//! (video). The overall listing is a view-time filter instead, so the
//! stored `overall` score is computed for everyone.

use crate::entity::{Modality, ModelEntity, RankScores};
use crate::profile::ScoringProfile;

/// What a projection does with an entity outside its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainFilter {
    /// Score normally.
    NoFilter,
    /// Hard zero; the entity does not compete on this axis.
    ExcludeEntirely,
    /// Keep competing at a fraction of the in-domain score.
    ScaleBy(f64),
}

impl DomainFilter {
    pub fn apply(self, score: f64) -> f64 {
        match self {
            DomainFilter::NoFilter => score,
            DomainFilter::ExcludeEntirely => 0.0,
            DomainFilter::ScaleBy(f) => score * f,
        }
    }
}

/// Compute all eight projections. `final_score`, metrics, and confidence
/// must already be in place.
pub fn compute_ranks(e: &ModelEntity, profile: &ScoringProfile) -> RankScores {
    let conf_factor = e.confidence / 100.0;
    let price_factor = 1.0 / (1.0 + e.metrics.price_input_1m / profile.price_softener);
    let speed_norm = (e.metrics.tokens_per_sec / profile.speed_norm_tps).clamp(0.0, 1.0);
    let speed_base = (e.metrics.tokens_per_sec / profile.speed_base_tps).clamp(0.0, 1.0);

    let w = &profile.overall;
    let overall = (e.final_score * w.core
        + e.metrics.coding_score * w.coding
        + e.metrics.creative_score * w.creative
        + conf_factor * w.confidence
        + price_factor * w.price)
        * 100.0;

    // Value stays on its natural (unbounded) scale. Free models are ranked
    // by quality alone; priced models by quality-squared per log-dollar.
    let value = if e.metrics.price_input_1m <= 0.0 {
        e.final_score * profile.value_free_multiplier
    } else {
        e.final_score.powi(2)
            / ((e.metrics.price_input_1m + 1.0).log10() + profile.value_log_offset)
    };

    let w = &profile.coding;
    let coding = (e.metrics.coding_score * w.coding
        + e.metrics.reasoning_score * w.reasoning
        + e.metrics.context_norm * w.context
        + conf_factor * w.confidence)
        * 100.0;

    let w = &profile.visual;
    let visual = (e.final_score * w.quality
        + e.metrics.creative_score * w.creative
        + speed_norm * w.speed
        + conf_factor * w.confidence)
        * 100.0;

    let image = image_policy(e).apply(visual);
    let video = video_policy(e, profile).apply(visual);

    let w = &profile.speed;
    let speed =
        (speed_base * w.base + conf_factor * w.confidence + price_factor * w.price) * 100.0;

    let w = &profile.enterprise;
    let enterprise = (conf_factor * w.confidence
        + e.metrics.uptime_sla * w.uptime
        + e.metrics.org_maturity * w.maturity)
        * 100.0;

    RankScores {
        overall,
        value,
        coding,
        image,
        video,
        speed,
        // Confidence is already on the 0–100 scale.
        confidence: e.confidence,
        enterprise,
    }
}

fn image_policy(e: &ModelEntity) -> DomainFilter {
    if e.has_modality(Modality::Image) {
        DomainFilter::NoFilter
    } else {
        DomainFilter::ExcludeEntirely
    }
}

fn video_policy(e: &ModelEntity, profile: &ScoringProfile) -> DomainFilter {
    if e.has_modality(Modality::Video) {
        DomainFilter::NoFilter
    } else {
        DomainFilter::ScaleBy(profile.video_offdomain_scale)
    }
}

/// The overall leaderboard lists text-capable models only. This is a view
/// filter: excluded entities keep their stored `overall` score.
pub fn overall_listing<'a>(entities: &'a [ModelEntity]) -> Vec<&'a ModelEntity> {
    entities
        .iter()
        .filter(|e| e.has_modality(Modality::Text))
        .collect()
}
