//! Node model, envelope extraction and configuration shared by the pedigree
//! comparison crates.

pub mod config;
pub mod error;
pub mod extract;
pub mod node;
pub mod value;

pub use config::{BatchConfig, MetricsConfig, RelationshipScheme, ScoringConfig, Settings};
pub use error::*;
pub use extract::{extract_node_values, extract_nodes, load_document, load_nodes, Envelope};
pub use node::*;
