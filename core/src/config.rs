#![deny(missing_docs)]

//! # Resolver Configuration
//!
//! Settings shared by every resolver a factory builds. Usually read from a
//! small YAML file:
//!
//! ```yaml
//! enable_normalization: true
//! normalization_locations: [query, path]
//! enable_validators: false
//! path_merge_strategy: replace
//! ```
//!
//! Omitted keys take their defaults.

use crate::error::AppResult;
use crate::oas::merger::MergeStrategy;
use crate::oas::schema::ParamLocation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Knobs for [`crate::builder::SchemaResolverBuilder`] and the merger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Attach the stock normalizers.
    pub enable_normalization: bool,
    /// Parameter locations whose raw string values get normalized.
    pub normalization_locations: Vec<ParamLocation>,
    /// Attach the stock constraint validators.
    pub enable_validators: bool,
    /// How colliding operation parameters are handled.
    pub path_merge_strategy: MergeStrategy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            enable_normalization: true,
            normalization_locations: vec![
                ParamLocation::Query,
                ParamLocation::Path,
                ParamLocation::Header,
            ],
            enable_validators: true,
            path_merge_strategy: MergeStrategy::Strict,
        }
    }
}

impl ResolverConfig {
    /// Parses a YAML configuration.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads a YAML configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
