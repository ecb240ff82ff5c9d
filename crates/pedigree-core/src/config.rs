use std::path::Path;

use config as cfg;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{PedigreeError, Result};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pedigree.toml";

/// Environment prefix; nested keys use `__`, e.g. `PEDIGREE__SCORING__SCHEME`.
pub const ENV_PREFIX: &str = "PEDIGREE";

/// Tier-2 deduction model. Each variant carries its own tier weights so a
/// scheme's deductions are never combined with the other scheme's weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipScheme {
    /// No-parents flag, partner-count and sibling-distribution differences.
    #[default]
    SiblingDistribution,
    /// Parent-presence, partnership-pair and divorce-pair differences.
    ParentPartnership,
}

impl RelationshipScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipScheme::SiblingDistribution => "sibling_distribution",
            RelationshipScheme::ParentPartnership => "parent_partnership",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub scheme: RelationshipScheme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Compute the consistency and spatial sections. They are never scored.
    pub diagnostics: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { diagnostics: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub golden_suffix: String,
    pub candidate_suffix: String,
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            golden_suffix: "_golden.json".into(),
            candidate_suffix: "_detectron.json".into(),
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scoring: ScoringConfig,
    pub metrics: MetricsConfig,
    pub batch: BatchConfig,
}

impl Settings {
    /// Load settings from an optional TOML file followed by `PEDIGREE__*`
    /// environment variables. An explicitly given file must exist; without
    /// one, `pedigree.toml` in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => cfg::File::from(p).required(true),
            None => cfg::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings: Settings = cfg::Config::builder()
            .add_source(file)
            .add_source(cfg::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        info!(
            scheme = settings.scoring.scheme.as_str(),
            diagnostics = settings.metrics.diagnostics,
            "configuration loaded"
        );
        Ok(settings)
    }

    /// Parse settings from a TOML string. Environment variables are ignored.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let settings: Settings = cfg::Config::builder()
            .add_source(cfg::File::from_str(raw, cfg::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        debug!(?settings, "parsed inline configuration");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let batch = &self.batch;
        if batch.golden_suffix.is_empty() || batch.candidate_suffix.is_empty() {
            return Err(PedigreeError::InvalidConfig(
                "batch suffixes must not be empty".into(),
            ));
        }
        if batch.golden_suffix == batch.candidate_suffix {
            return Err(PedigreeError::InvalidConfig(format!(
                "golden and candidate suffix are both `{}`",
                batch.golden_suffix
            )));
        }
        Ok(())
    }
}
