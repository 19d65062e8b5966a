//! JSON export: the full bundle, pretty-printed.

use std::path::Path;

use anyhow::{Context, Result};

use crate::export::ExportBundle;

pub fn to_json(bundle: &ExportBundle) -> Result<String> {
    serde_json::to_string_pretty(bundle).context("serializing export bundle")
}

pub fn write_json(path: &Path, bundle: &ExportBundle) -> Result<()> {
    let body = to_json(bundle)?;
    crate::export::csv::write_file(path, &body)
}
