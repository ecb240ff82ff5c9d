//! Golden-vs-candidate pedigree scoring.
//!
//! The usual entry point is [`compare_documents`] (or [`compare_files`]),
//! which runs extraction, both metric passes for each graph and the tiered
//! [`Scorer`], returning one [`Comparison`]. [`report`] turns a comparison
//! into spreadsheet-style sheets and [`batch`] runs whole directories.

pub mod batch;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod weight;

pub use batch::{discover_pairs, mean_score, run_batch, BatchOutcome, BatchRow, ScorePair};
pub use pipeline::{compare_documents, compare_files, compare_nodes, CompareOptions, Comparison, GraphSummary};
pub use report::{build_sheets, ReportRow, ReportSheet, Workbook};
pub use scorer::{score, DeductionItem, ScoreBand, ScoreBreakdown, Scorer, Tier, TierWeights};
pub use weight::{generation_weight, total_levels};
