//! Converter configuration
//!
//! ```toml
//! mode = "strict"
//!
//! [front_end]
//! python = "/usr/bin/python3"
//! script = "third_party/cython_json.py"
//! ```

use anyhow::{Context, Result};
use cy_lower::ConversionMode;
use lang_cython::FrontEndConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for a [`Converter`](crate::Converter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// What to do with sub-trees that cannot be converted
    pub mode: ConversionMode,
    /// How to run the Cython helper
    pub front_end: FrontEndConfig,
}

impl ConverterConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read converter config: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse converter config: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
