//! Plain-text top list, the simplest artifact for pasting into chat or a
//! terminal. Same roster and order as the overall board, capped at 50.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use crate::entity::ModelEntity;
use crate::ordering::sort_by_score;
use crate::profile::ScoringProfile;
use crate::ranking::overall_listing;

const MAX_ROWS: usize = 50;

pub fn top_list(models: &[ModelEntity], profile: &ScoringProfile) -> String {
    let mut sorted: Vec<ModelEntity> =
        overall_listing(models).into_iter().cloned().collect();
    sort_by_score(&mut sorted, profile.tie_epsilon_rank(), |e| e.ranks.overall);

    let mut out = String::from("CrossBench Top Models\n=====================\n");
    for (i, e) in sorted.iter().take(MAX_ROWS).enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({}) - {:.1}",
            i + 1,
            e.name,
            e.organization,
            e.ranks.clamped().overall
        );
    }
    out
}

pub fn write_top_list(path: &Path, models: &[ModelEntity], profile: &ScoringProfile) -> Result<()> {
    crate::export::csv::write_file(path, &top_list(models, profile))
}
