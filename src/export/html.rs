//! Static HTML leaderboard page.
//!
//! Renders the top of the overall board into a table and embeds the full
//! bundle as JSON in a script tag for client-side use. Text nodes are
//! entity-escaped; the embedded JSON additionally escapes `</` so a hostile
//! model name can never close the script element.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use crate::entity::ModelEntity;
use crate::export::ExportBundle;
use crate::ordering::sort_by_score;
use crate::profile::ScoringProfile;
use crate::ranking::overall_listing;

const TABLE_ROWS: usize = 50;

/// The overall table lists text-capable models only; image/video-only
/// entities still ship in the embedded JSON with their stored scores.
pub fn render_page(
    models: &[ModelEntity],
    bundle: &ExportBundle,
    profile: &ScoringProfile,
) -> Result<String> {
    let mut sorted: Vec<ModelEntity> =
        overall_listing(models).into_iter().cloned().collect();
    sort_by_score(&mut sorted, profile.tie_epsilon_rank(), |e| e.ranks.overall);

    let mut rows = String::new();
    for (i, e) in sorted.iter().take(TABLE_ROWS).enumerate() {
        let r = e.ranks.clamped();
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td><td>{:.0}%</td><td>{}</td></tr>",
            i + 1,
            html_escape::encode_text(&e.name),
            html_escape::encode_text(&e.organization),
            r.overall,
            e.confidence,
            e.primary_type()
        );
    }

    let embedded = crate::export::json::to_json(bundle)?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>CrossBench Leaderboard</title>
<style>
body{{font-family:system-ui,sans-serif;margin:2rem;background:#fafafa;color:#222}}
table{{border-collapse:collapse;width:100%}}
th,td{{padding:.4rem .8rem;border-bottom:1px solid #ddd;text-align:left}}
th{{background:#f0f0f0}}
.meta{{color:#666;font-size:.85rem}}
</style>
</head>
<body>
<h1>CrossBench Leaderboard</h1>
<p class="meta">Generated {generated} &middot; {count} models</p>
<table>
<thead><tr><th>#</th><th>Model</th><th>Organization</th><th>Overall</th><th>Confidence</th><th>Type</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<script id="crossbench-data" type="application/json">
{embedded}
</script>
</body>
</html>
"#,
        generated = html_escape::encode_text(&bundle.generated_at),
        count = bundle.model_count,
        rows = rows,
        embedded = embedded,
    ))
}

pub fn write_page(
    path: &Path,
    models: &[ModelEntity],
    bundle: &ExportBundle,
    profile: &ScoringProfile,
) -> Result<()> {
    let page = render_page(models, bundle, profile)?;
    crate::export::csv::write_file(path, &page)
}
