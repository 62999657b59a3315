//! Runtime configuration
//!
//! Tunable memory and server parameters. Loaded from TOML at startup,
//! falls back to defaults if no config file exists. The transform and
//! evolution constants are fixed and live in the crate root.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::{DEFAULT_BASELINE_WEIGHT, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_WEIGHT_INCREMENT};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindConfig {
    /// Pattern store parameters.
    pub memory: MemoryConfig,
    /// HTTP server parameters.
    pub server: ServerConfig,
}

/// Which matching rule the pattern store applies after an exact miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityKind {
    /// Fingerprint equality only.
    Exact,
    /// Fingerprint equality, then word-set Jaccard overlap.
    Jaccard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub similarity: SimilarityKind,
    /// Jaccard overlap a fuzzy match must exceed, in [0, 1).
    pub similarity_threshold: f64,
    /// Weight of a newly created record.
    pub baseline_weight: f64,
    /// Weight added per successful reinforcement.
    pub weight_increment: f64,
    /// Optional hard bound on distinct records. Unset means unbounded.
    pub max_records: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `--serve`.
    pub addr: String,
    /// Buffered outcomes per WebSocket subscriber.
    pub broadcast_capacity: usize,
}

impl Default for MindConfig {
    fn default() -> Self {
        Self {
            memory: MemoryConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            similarity: SimilarityKind::Exact,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            baseline_weight: DEFAULT_BASELINE_WEIGHT,
            weight_increment: DEFAULT_WEIGHT_INCREMENT,
            max_records: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".into(),
            broadcast_capacity: 100,
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl MindConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.memory;
        if !(m.similarity_threshold >= 0.0 && m.similarity_threshold < 1.0) {
            return Err(Error::Config(format!(
                "memory.similarity_threshold must be in [0, 1), got {}",
                m.similarity_threshold
            )));
        }
        if !(m.baseline_weight.is_finite() && m.baseline_weight > 0.0) {
            return Err(Error::Config("memory.baseline_weight must be > 0".into()));
        }
        if !(m.weight_increment.is_finite() && m.weight_increment >= 0.0) {
            return Err(Error::Config("memory.weight_increment must be >= 0".into()));
        }
        if m.max_records == Some(0) {
            return Err(Error::Config("memory.max_records must be > 0 when set".into()));
        }
        if self.server.broadcast_capacity == 0 {
            return Err(Error::Config("server.broadcast_capacity must be > 0".into()));
        }
        Ok(())
    }
}
