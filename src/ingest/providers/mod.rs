// src/ingest/providers/mod.rs
pub mod zeroeval;

pub use zeroeval::ZeroEvalProvider;
