use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Clustering parameters.
///
/// Loadable from TOML; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    /// Minimum mean similarity for two clusters to merge, in [0, 1]
    pub threshold: f64,
    /// Upper bound on the number of clusters the merger aims for
    pub max_clusters: usize,
    /// Blend in the mock SERP overlap signal
    pub use_serp: bool,
    /// Blend in the intent match signal
    pub use_intent: bool,
    /// Alias of `use_intent`
    pub group_by_intent: bool,
    /// Seed for the mock SERP signal; random when unset. The sequence restarts
    /// on every run, so one engine repeats its output for the same input.
    pub serp_seed: Option<u64>,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            max_clusters: 10,
            use_serp: false,
            use_intent: false,
            group_by_intent: false,
            serp_seed: None,
        }
    }
}

impl ClusterOptions {
    pub fn new(threshold: f64, max_clusters: usize) -> Self {
        Self {
            threshold,
            max_clusters,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn intent_enabled(&self) -> bool {
        self.use_intent || self.group_by_intent
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Reject parameters the engine assumes valid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(EngineError::InvalidThreshold(self.threshold));
        }
        if self.max_clusters == 0 {
            return Err(EngineError::InvalidMaxClusters(self.max_clusters));
        }
        Ok(())
    }
}
