use anyhow::{Context, Result};
use pedigree_scoring::{mean_score, BatchRow};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub pairs: usize,
    pub scored: usize,
    pub failed: usize,
    pub mean_score: Option<f64>,
    pub rows: &'a [BatchRow],
}

impl<'a> BatchReport<'a> {
    pub fn new(rows: &'a [BatchRow]) -> Self {
        let scored = rows.iter().filter(|r| r.score().is_some()).count();
        Self {
            pairs: rows.len(),
            scored,
            failed: rows.len() - scored,
            mean_score: mean_score(rows),
            rows,
        }
    }
}

/// Write `value` as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "exported report");
    Ok(())
}
