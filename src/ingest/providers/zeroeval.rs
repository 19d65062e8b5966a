//! ZeroEval leaderboard provider.
//!
//! `Http` mode performs a single GET (retry/backoff is deliberately out of
//! scope); `Fixture` mode serves a canned payload for tests and offline runs.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::ingest::types::{ModelProvider, RawModelRecord};

pub const DEFAULT_API_URL: &str =
    "https://api.zeroeval.com/leaderboard/models/full?justCanonicals=true";

pub struct ZeroEvalProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http {
        url: String,
        client: reqwest::Client,
    },
}

impl ZeroEvalProvider {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            mode: Mode::Http {
                url: url.into(),
                client: reqwest::Client::new(),
            },
        }
    }

    pub fn default_api() -> Self {
        Self::from_url(DEFAULT_API_URL)
    }

    /// Serve a canned JSON payload (tests, offline snapshots).
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }
}

#[async_trait]
impl ModelProvider for ZeroEvalProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawModelRecord>> {
        let payload = match &self.mode {
            Mode::Fixture(s) => s.clone(),
            Mode::Http { url, client } => client
                .get(url)
                .send()
                .await
                .with_context(|| format!("requesting {url}"))?
                .error_for_status()
                .context("leaderboard API returned an error status")?
                .text()
                .await
                .context("reading leaderboard response body")?,
        };
        RawModelRecord::from_payload(&payload).context("parsing leaderboard payload")
    }

    fn name(&self) -> &'static str {
        "ZeroEval"
    }
}
