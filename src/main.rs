//! CrossBench runner: fetch → score → export.
//!
//! Provider selection via environment:
//! - `CROSSBENCH_SNAPSHOT_PATH`: score a saved JSON payload (offline).
//! - `CROSSBENCH_API_URL`: fetch from a custom leaderboard endpoint.
//! - otherwise: the default ZeroEval API.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crossbench::entity::Modality;
use crossbench::export::{csv, html, json, text, ExportBundle};
use crossbench::ingest::{self, types::ModelProvider};
use crossbench::{score_batch, ScoringProfile, SignalConfig, ZeroEvalProvider};

const ENV_SNAPSHOT_PATH: &str = "CROSSBENCH_SNAPSHOT_PATH";
const ENV_API_URL: &str = "CROSSBENCH_API_URL";
const ENV_OUTPUT_DIR: &str = "CROSSBENCH_OUTPUT_DIR";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crossbench=info,warn")),
        )
        .compact()
        .init();

    let profile = ScoringProfile::load();
    let signal_config = SignalConfig::load();
    let provider = build_provider()?;

    let providers: Vec<Box<dyn ModelProvider>> = vec![provider];
    let records = ingest::run_once(&providers).await;
    if records.is_empty() {
        anyhow::bail!("no records received from any provider");
    }
    tracing::info!(records = records.len(), "scoring batch");

    let report = score_batch(&records, &signal_config, &profile);
    log_summary(&report);

    let out_dir = std::env::var(ENV_OUTPUT_DIR).unwrap_or_else(|_| "output".to_string());
    let out = PathBuf::from(out_dir);

    let bundle = ExportBundle::from_report(&report);
    json::write_json(&out.join("leaderboard.json"), &bundle)?;
    csv::write_file(
        &out.join("performance.csv"),
        &csv::performance_csv(&report.models, &profile),
    )?;
    csv::write_file(
        &out.join("value.csv"),
        &csv::value_csv(&report.models, &profile),
    )?;
    csv::write_file(&out.join("price.csv"), &csv::price_csv(&report.models))?;
    html::write_page(
        &out.join("leaderboard.html"),
        &report.models,
        &bundle,
        &profile,
    )?;
    text::write_top_list(&out.join("leaderboard.txt"), &report.models, &profile)?;

    tracing::info!(dir = %out.display(), "export complete");
    Ok(())
}

fn build_provider() -> Result<Box<dyn ModelProvider>> {
    if let Ok(path) = std::env::var(ENV_SNAPSHOT_PATH) {
        let payload = std::fs::read_to_string(Path::new(&path))
            .with_context(|| format!("reading snapshot {path}"))?;
        tracing::info!(path, "using offline snapshot");
        return Ok(Box::new(ZeroEvalProvider::from_fixture_str(&payload)));
    }
    if let Ok(url) = std::env::var(ENV_API_URL) {
        tracing::info!(url, "using custom API endpoint");
        return Ok(Box::new(ZeroEvalProvider::from_url(url)));
    }
    Ok(Box::new(ZeroEvalProvider::default_api()))
}

fn log_summary(report: &crossbench::BatchReport) {
    let text = report
        .models
        .iter()
        .filter(|m| m.has_modality(Modality::Text))
        .count();
    let image = report
        .models
        .iter()
        .filter(|m| m.has_modality(Modality::Image))
        .count();
    let video = report
        .models
        .iter()
        .filter(|m| m.has_modality(Modality::Video))
        .count();
    tracing::info!(
        models = report.models.len(),
        skipped = report.skipped,
        duplicates = report.duplicates,
        text,
        image,
        video,
        organizations = report.ecosystem.len(),
        "batch scored"
    );

    if let Some(top) = report
        .models
        .iter()
        .max_by(|a, b| {
            a.ranks
                .overall
                .partial_cmp(&b.ranks.overall)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    {
        tracing::info!(
            model = %top.name,
            organization = %top.organization,
            overall = format!("{:.1}", top.ranks.overall),
            confidence = format!("{:.0}", top.confidence),
            "top overall"
        );
    }
}
