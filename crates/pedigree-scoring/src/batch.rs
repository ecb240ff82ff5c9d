//! Directory-level comparison of golden/candidate file pairs.

use crate::pipeline::{compare_files, CompareOptions};
use crate::scorer::ScoreBand;
use pedigree_core::{BatchConfig, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One golden file and the candidate expected next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorePair {
    pub id: String,
    pub golden: PathBuf,
    pub candidate: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Scored {
        final_score: f64,
        total_deductions: f64,
        band: ScoreBand,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub id: String,
    pub golden_file: String,
    pub candidate_file: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

impl BatchRow {
    pub fn score(&self) -> Option<f64> {
        match self.outcome {
            BatchOutcome::Scored { final_score, .. } => Some(final_score),
            BatchOutcome::Failed { .. } => None,
        }
    }
}

/// Numeric ids in numeric order first, then the rest lexically.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Pair every `<id><golden_suffix>` in `golden_dir` with
/// `<id><candidate_suffix>` in `candidate_dir`. A missing candidate still
/// yields a pair so that it is reported as a failure.
pub fn discover_pairs(
    golden_dir: &Path,
    candidate_dir: &Path,
    config: &BatchConfig,
) -> Result<Vec<ScorePair>> {
    let mut pairs = Vec::new();
    for entry in fs::read_dir(golden_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(id) = file_name.strip_suffix(config.golden_suffix.as_str()) else {
            continue;
        };
        if id.is_empty() {
            continue;
        }
        pairs.push(ScorePair {
            id: id.to_string(),
            candidate: candidate_dir.join(format!("{}{}", id, config.candidate_suffix)),
            golden: path.clone(),
        });
    }
    pairs.sort_by(|a, b| compare_ids(&a.id, &b.id));
    info!(
        golden_dir = %golden_dir.display(),
        pairs = pairs.len(),
        "discovered comparison pairs"
    );
    Ok(pairs)
}

fn run_pair(pair: &ScorePair, options: &CompareOptions) -> BatchRow {
    let outcome = match compare_files(&pair.golden, &pair.candidate, options) {
        Ok(comparison) => BatchOutcome::Scored {
            final_score: comparison.score.final_score,
            total_deductions: comparison.score.total_deductions,
            band: comparison.score.band,
        },
        Err(err) => {
            warn!(id = %pair.id, error = %err, "comparison failed");
            BatchOutcome::Failed {
                error: err.to_string(),
            }
        }
    };
    BatchRow {
        id: pair.id.clone(),
        golden_file: pair.golden.display().to_string(),
        candidate_file: pair.candidate.display().to_string(),
        outcome,
    }
}

/// Compare every pair. Rows keep the order of `pairs`; a failed pair becomes
/// a `Failed` row and never aborts the batch.
pub fn run_batch(pairs: &[ScorePair], options: &CompareOptions, parallel: bool) -> Vec<BatchRow> {
    if parallel {
        pairs.par_iter().map(|p| run_pair(p, options)).collect()
    } else {
        pairs.iter().map(|p| run_pair(p, options)).collect()
    }
}

/// Mean score over the scored rows, if any.
pub fn mean_score(rows: &[BatchRow]) -> Option<f64> {
    let scores: Vec<f64> = rows.iter().filter_map(BatchRow::score).collect();
    (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn numeric_ids_sort_numerically() {
        let mut ids = vec!["10", "b", "2", "a", "1"];
        ids.sort_by(|a, b| compare_ids(a, b));
        assert_eq!(ids, vec!["1", "2", "10", "a", "b"]);
    }

    #[test]
    fn pairs_failures_and_scores() {
        let golden = TempDir::new().unwrap();
        let candidate = TempDir::new().unwrap();
        let doc = r#"[{"name": "A", "sex": "M", "level": 0, "top_level": true}]"#;
        fs::write(golden.path().join("10_golden.json"), doc).unwrap();
        fs::write(golden.path().join("2_golden.json"), doc).unwrap();
        fs::write(golden.path().join("notes.txt"), "ignored").unwrap();
        fs::write(candidate.path().join("10_detectron.json"), doc).unwrap();
        fs::write(candidate.path().join("2_detectron.json"), r#"{"nodes": 1}"#).unwrap();

        let config = BatchConfig::default();
        let pairs = discover_pairs(golden.path(), candidate.path(), &config).unwrap();
        let ids: Vec<_> = pairs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "10"]);

        for parallel in [false, true] {
            let rows = run_batch(&pairs, &CompareOptions::default(), parallel);
            assert_eq!(rows[0].id, "2");
            assert!(matches!(rows[0].outcome, BatchOutcome::Failed { .. }));
            assert_eq!(rows[1].score(), Some(100.0));
            assert_eq!(mean_score(&rows), Some(100.0));
        }
    }

    #[test]
    fn missing_candidate_is_reported() {
        let golden = TempDir::new().unwrap();
        let candidate = TempDir::new().unwrap();
        fs::write(golden.path().join("7_golden.json"), "[]").unwrap();
        let pairs = discover_pairs(golden.path(), candidate.path(), &BatchConfig::default()).unwrap();
        let rows = run_batch(&pairs, &CompareOptions::default(), false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score(), None);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["status"], "failed");
        assert!(mean_score(&rows).is_none());
    }
}
