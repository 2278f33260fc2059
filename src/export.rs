use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_EXPORT_FILE: &str = "recipes.json";

/// Writes `data` as pretty-printed JSON so it can be reused later.
pub fn export_json<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize export data")?;
    fs::write(path, json).with_context(|| format!("Failed to write export file {:?}", path))?;
    info!(path = ?path, "exported data");
    Ok(())
}
