//! Per-graph metrics for pedigree node lists.
//!
//! [`compute_metrics`] produces the flat basic counters and
//! [`compute_extended_metrics`] the sectioned statistics. Both are pure and
//! computed independently for each graph; comparison happens downstream.

pub mod basic;
pub mod extended;
pub mod index;
pub mod vocab;

pub use basic::{compute_metrics, BasicMetrics};
pub use extended::{
    compute_extended_metrics, compute_extended_metrics_with, CanvasBounds, ConsistencyChecks,
    Distribution, Edges, ExtendedMetrics, ExtendedOptions, GenderAndNaming, GenderClass,
    GenderDistribution, ParentChildAndSiblings, ParentsCompleteness, Partnerships, Shading,
    Spatial, Structural, Symbols,
};
pub use index::PedigreeIndex;
pub use vocab::{Symbol, DISEASE_PATTERNS};
