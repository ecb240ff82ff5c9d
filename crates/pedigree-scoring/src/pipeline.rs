use crate::scorer::{ScoreBreakdown, Scorer};
use pedigree_core::{extract_nodes, load_nodes, PedigreeNode, RelationshipScheme, Result, Settings};
use pedigree_metrics::{
    compute_extended_metrics_with, compute_metrics, BasicMetrics, ExtendedMetrics, ExtendedOptions,
};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    pub scheme: RelationshipScheme,
    pub extended: ExtendedOptions,
}

impl From<&Settings> for CompareOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            scheme: settings.scoring.scheme,
            extended: ExtendedOptions::from(&settings.metrics),
        }
    }
}

/// Both metric snapshots of one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub basic: BasicMetrics,
    pub extended: ExtendedMetrics,
}

impl GraphSummary {
    pub fn compute(nodes: &[PedigreeNode], options: &ExtendedOptions) -> Self {
        Self {
            basic: compute_metrics(nodes),
            extended: compute_extended_metrics_with(nodes, options),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub golden: GraphSummary,
    pub candidate: GraphSummary,
    pub score: ScoreBreakdown,
}

pub fn compare_nodes(
    golden: &[PedigreeNode],
    candidate: &[PedigreeNode],
    options: &CompareOptions,
) -> Comparison {
    let golden = GraphSummary::compute(golden, &options.extended);
    let candidate = GraphSummary::compute(candidate, &options.extended);
    let score = Scorer::new(options.scheme).score(
        &golden.basic,
        &candidate.basic,
        &golden.extended,
        &candidate.extended,
    );
    Comparison {
        golden,
        candidate,
        score,
    }
}

/// Extract both node arrays and compare them. Fails with `MalformedInput`
/// when either document has no recognizable envelope.
pub fn compare_documents(
    golden: &Value,
    candidate: &Value,
    options: &CompareOptions,
) -> Result<Comparison> {
    let golden = extract_nodes(golden)?;
    let candidate = extract_nodes(candidate)?;
    debug!(
        golden_nodes = golden.len(),
        candidate_nodes = candidate.len(),
        "comparing documents"
    );
    Ok(compare_nodes(&golden, &candidate, options))
}

pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    golden: P,
    candidate: Q,
    options: &CompareOptions,
) -> Result<Comparison> {
    let (golden, candidate) = (golden.as_ref(), candidate.as_ref());
    let comparison = compare_nodes(&load_nodes(golden)?, &load_nodes(candidate)?, options);
    info!(
        golden = %golden.display(),
        candidate = %candidate.display(),
        score = comparison.score.final_score,
        "compared pedigree files"
    );
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedigree_core::PedigreeError;
    use serde_json::json;

    #[test]
    fn options_follow_settings() {
        let mut settings = Settings::default();
        settings.scoring.scheme = RelationshipScheme::ParentPartnership;
        settings.metrics.diagnostics = false;
        let options = CompareOptions::from(&settings);
        assert_eq!(options.scheme, RelationshipScheme::ParentPartnership);
        assert!(!options.extended.diagnostics);
    }

    #[test]
    fn documents_in_different_envelopes_compare_equal() {
        let nodes = json!([{"name": "A", "sex": "M", "level": 0, "top_level": true}]);
        let golden = json!({"original_json": {"json": nodes.clone()}});
        let candidate = json!({"json": nodes});
        let c = compare_documents(&golden, &candidate, &CompareOptions::default()).unwrap();
        assert_eq!(c.score.final_score, 100.0);
        assert_eq!(c.golden.basic, c.candidate.basic);
    }

    #[test]
    fn malformed_document_is_an_error_not_a_score() {
        let good = json!([]);
        let bad = json!({"nodes": []});
        let err = compare_documents(&good, &bad, &CompareOptions::default()).unwrap_err();
        assert!(matches!(err, PedigreeError::MalformedInput(_)));
    }
}
