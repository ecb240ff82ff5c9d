//! Extended per-graph statistics, grouped into the report sections.
//!
//! Every section is computed from one shared [`PedigreeIndex`]. The
//! `consistency_checks` and `spatial` sections are diagnostics for human
//! review and never feed the score; they can be switched off with
//! [`ExtendedOptions::diagnostics`], which also skips the quadratic overlap
//! scan.

mod consistency;
mod family;
mod gender;
mod partnerships;
mod shading;
mod spatial;
mod structural;
mod symbols;

pub use consistency::ConsistencyChecks;
pub use family::{ParentChildAndSiblings, ParentsCompleteness};
pub use gender::{GenderAndNaming, GenderClass, GenderDistribution};
pub use partnerships::Partnerships;
pub use shading::Shading;
pub use spatial::{CanvasBounds, Spatial};
pub use structural::Structural;
pub use symbols::{Edges, Symbols};

use crate::index::PedigreeIndex;
use pedigree_core::{MetricsConfig, PedigreeNode};
use serde::Serialize;
use tracing::debug;

/// min/max/avg over a list of sizes; all zero when the list is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub min: usize,
    pub max: usize,
    pub avg: f64,
}

impl Distribution {
    pub fn from_sizes<I: IntoIterator<Item = usize>>(sizes: I) -> Self {
        let mut count = 0usize;
        let mut sum = 0usize;
        let mut min = usize::MAX;
        let mut max = 0usize;
        for s in sizes {
            count += 1;
            sum += s;
            min = min.min(s);
            max = max.max(s);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            min,
            max,
            avg: sum as f64 / count as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedOptions {
    pub diagnostics: bool,
}

impl Default for ExtendedOptions {
    fn default() -> Self {
        Self { diagnostics: true }
    }
}

impl From<&MetricsConfig> for ExtendedOptions {
    fn from(cfg: &MetricsConfig) -> Self {
        Self {
            diagnostics: cfg.diagnostics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedMetrics {
    pub structural: Structural,
    pub gender_and_naming: GenderAndNaming,
    pub partnerships: Partnerships,
    pub parent_child_and_siblings: ParentChildAndSiblings,
    pub shading: Shading,
    pub symbols: Symbols,
    pub edges: Edges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency_checks: Option<ConsistencyChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial: Option<Spatial>,
}

pub fn compute_extended_metrics(nodes: &[PedigreeNode]) -> ExtendedMetrics {
    compute_extended_metrics_with(nodes, &ExtendedOptions::default())
}

pub fn compute_extended_metrics_with(
    nodes: &[PedigreeNode],
    options: &ExtendedOptions,
) -> ExtendedMetrics {
    let index = PedigreeIndex::build(nodes);

    let metrics = ExtendedMetrics {
        structural: structural::compute(&index),
        gender_and_naming: gender::compute(nodes),
        partnerships: partnerships::compute(&index),
        parent_child_and_siblings: family::compute(&index),
        shading: shading::compute(nodes),
        symbols: symbols::compute_symbols(nodes),
        edges: symbols::compute_edges(nodes),
        consistency_checks: options.diagnostics.then(|| consistency::compute(&index)),
        spatial: options.diagnostics.then(|| spatial::compute(nodes)),
    };

    debug!(
        nodes = nodes.len(),
        generations = metrics.structural.generations_count,
        partnerships = metrics.partnerships.partnerships_count,
        sibling_groups = metrics.parent_child_and_siblings.sibling_groups_count,
        "computed extended metrics"
    );
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_of_nothing_is_zero() {
        assert_eq!(Distribution::from_sizes(Vec::new()), Distribution::default());
    }

    #[test]
    fn distribution_summarizes_sizes() {
        let d = Distribution::from_sizes([2, 3, 7]);
        assert_eq!(d.min, 2);
        assert_eq!(d.max, 7);
        assert!((d.avg - 4.0).abs() < 1e-12);
    }

    #[test]
    fn diagnostics_can_be_disabled() {
        let nodes = vec![PedigreeNode::default()];
        let m = compute_extended_metrics_with(&nodes, &ExtendedOptions { diagnostics: false });
        assert!(m.consistency_checks.is_none());
        assert!(m.spatial.is_none());
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("spatial").is_none());
    }
}
