//! Scoring profile: every tier threshold and projection weight in one
//! injectable table, so tests can pin boundary behavior precisely.
//!
//! Loads from TOML with built-in defaults; any subset of keys may be
//! overridden. Resolution order:
//! 1. `$CROSSBENCH_PROFILE_PATH`
//! 2. `config/profile.toml`
//! 3. built-in defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROFILE_PATH: &str = "config/profile.toml";
pub const ENV_PROFILE_PATH: &str = "CROSSBENCH_PROFILE_PATH";

/// One quality-tier branch: `final_score > min` grants `bonus`.
/// Evaluated high-to-low, first match only.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct QualityTier {
    pub min: f64,
    pub bonus: f64,
}

/// Overall projection weights.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverallWeights {
    pub core: f64,
    pub coding: f64,
    pub creative: f64,
    pub confidence: f64,
    pub price: f64,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            core: 0.40,
            coding: 0.20,
            creative: 0.15,
            confidence: 0.15,
            price: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodingWeights {
    pub coding: f64,
    pub reasoning: f64,
    pub context: f64,
    pub confidence: f64,
}

impl Default for CodingWeights {
    fn default() -> Self {
        Self {
            coding: 0.6,
            reasoning: 0.2,
            context: 0.1,
            confidence: 0.1,
        }
    }
}

/// Shared weighting for the image and video projections.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualWeights {
    pub quality: f64,
    pub creative: f64,
    pub speed: f64,
    pub confidence: f64,
}

impl Default for VisualWeights {
    fn default() -> Self {
        Self {
            quality: 0.5,
            creative: 0.3,
            speed: 0.1,
            confidence: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeedWeights {
    pub base: f64,
    pub confidence: f64,
    pub price: f64,
}

impl Default for SpeedWeights {
    fn default() -> Self {
        Self {
            base: 0.7,
            confidence: 0.2,
            price: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnterpriseWeights {
    pub confidence: f64,
    pub uptime: f64,
    pub maturity: f64,
}

impl Default for EnterpriseWeights {
    fn default() -> Self {
        Self {
            confidence: 0.4,
            uptime: 0.3,
            maturity: 0.3,
        }
    }
}

/// Coarse two-level maturity/uptime constants supplied by enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TierPair {
    pub org_maturity: f64,
    pub uptime_sla: f64,
}

/// Composite ecosystem share: `count·count_weight + mean·mean_scale·mean_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EcosystemWeights {
    pub count_weight: f64,
    pub mean_weight: f64,
    pub mean_scale: f64,
}

impl Default for EcosystemWeights {
    fn default() -> Self {
        Self {
            count_weight: 0.4,
            mean_weight: 0.3,
            mean_scale: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    // --- Confidence stage ---
    pub confidence_base: f64,
    pub signal_bonus: f64,
    pub recency_bonus: f64,
    pub versatility_bonus: f64,
    pub versatile_sub_score_min: f64,
    pub variance_penalty: f64,
    pub enterprise_bonus: f64,
    /// Descending breakpoints; first `final_score > min` wins.
    pub quality_tiers: Vec<QualityTier>,
    pub low_quality_floor: f64,
    pub low_quality_penalty: f64,
    pub confidence_min: f64,
    pub confidence_max: f64,
    /// Confidence without any signal, fixed outside the formula.
    pub confidence_no_evidence: f64,

    // --- Recency tiering (days; tier 3, 2, 1 boundaries) ---
    pub recency_tier_days: [i64; 3],
    /// Full/half confidence recency bonus boundaries (days).
    pub recency_confidence_days: [i64; 2],

    // --- Ranking normalization ---
    pub price_softener: f64,
    pub speed_norm_tps: f64,
    pub speed_base_tps: f64,
    pub context_window_tokens: f64,
    pub value_free_multiplier: f64,
    pub value_log_offset: f64,
    pub video_offdomain_scale: f64,

    // --- Projection weights ---
    pub overall: OverallWeights,
    pub coding: CodingWeights,
    pub visual: VisualWeights,
    pub speed: SpeedWeights,
    pub enterprise: EnterpriseWeights,

    // --- Enterprise tier constants ---
    pub enterprise_tiers: TierPair,
    pub standard_tiers: TierPair,

    // --- Tie-breaking ---
    /// Epsilon on the `[0,1]` scale; multiply by 100 for rank-scale sorts.
    pub tie_epsilon: f64,

    // --- Ecosystem ---
    pub ecosystem: EcosystemWeights,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            confidence_base: 50.0,
            signal_bonus: 10.0,
            recency_bonus: 5.0,
            versatility_bonus: 10.0,
            versatile_sub_score_min: 0.75,
            variance_penalty: 50.0,
            enterprise_bonus: 5.0,
            quality_tiers: vec![
                QualityTier {
                    min: 0.85,
                    bonus: 15.0,
                },
                QualityTier {
                    min: 0.75,
                    bonus: 10.0,
                },
                QualityTier {
                    min: 0.65,
                    bonus: 5.0,
                },
            ],
            low_quality_floor: 0.40,
            low_quality_penalty: 10.0,
            confidence_min: 10.0,
            confidence_max: 99.0,
            confidence_no_evidence: 10.0,

            recency_tier_days: [30, 90, 180],
            recency_confidence_days: [30, 90],

            price_softener: 10.0,
            speed_norm_tps: 150.0,
            speed_base_tps: 200.0,
            context_window_tokens: 200_000.0,
            value_free_multiplier: 1000.0,
            value_log_offset: 0.1,
            video_offdomain_scale: 0.3,

            overall: OverallWeights::default(),
            coding: CodingWeights::default(),
            visual: VisualWeights::default(),
            speed: SpeedWeights::default(),
            enterprise: EnterpriseWeights::default(),

            enterprise_tiers: TierPair {
                org_maturity: 0.95,
                uptime_sla: 0.99,
            },
            standard_tiers: TierPair {
                org_maturity: 0.50,
                uptime_sla: 0.80,
            },

            tie_epsilon: 0.005,

            ecosystem: EcosystemWeights::default(),
        }
    }
}

impl ScoringProfile {
    /// Epsilon matching scores already scaled to `[0,100]`.
    pub fn tie_epsilon_rank(&self) -> f64 {
        self.tie_epsilon * 100.0
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing scoring profile TOML")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scoring profile from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks; built-in defaults when no file exists
    /// or the file does not parse (a warning is logged, the run continues).
    pub fn load() -> Self {
        let path = std::env::var(ENV_PROFILE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROFILE_PATH));
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = ?e, path = %path.display(), "invalid scoring profile, using defaults");
                Self::default()
            }
        }
    }
}
