//! CrossBench: cross-benchmark model scoring and ranking.
//!
//! Ingests raw leaderboard records, fuses weighted benchmark signals into a
//! quality score, derives a confidence estimate, projects every model onto
//! eight leaderboard axes, and exports the result as JSON, CSV, and HTML.
//!
//! Stage order per model is fixed: signal collection → aggregation →
//! enrichment → recency tiering → confidence → ranking.

pub mod aggregate;
pub mod confidence;
pub mod ecosystem;
pub mod engine;
pub mod enrich;
pub mod entity;
pub mod export;
pub mod ingest;
pub mod ordering;
pub mod profile;
pub mod ranking;
pub mod signals;

pub use engine::{score_batch, score_record, BatchReport};
pub use entity::{Modality, ModelEntity, RankScores, Signal};
pub use ingest::providers::ZeroEvalProvider;
pub use ingest::types::{ModelProvider, RawModelRecord};
pub use profile::ScoringProfile;
pub use signals::SignalConfig;
