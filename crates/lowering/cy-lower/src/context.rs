//! Per-conversion lowering state

use crate::error::LowerError;
use crate::lowered::Lowered;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How anomalies in the foreign tree are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Drop the offending sub-tree, log it and keep converting
    #[default]
    Permissive,
    /// Fail the whole conversion on the first anomaly
    Strict,
}

/// Context for lowering one document
///
/// A context is created per conversion call and owns everything recorded
/// during it.
#[derive(Debug, Default)]
pub struct LoweringContext {
    mode: ConversionMode,
    diagnostics: Vec<LowerError>,
}

impl LoweringContext {
    /// Create a context for one conversion
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            diagnostics: Vec::new(),
        }
    }

    /// The anomaly policy in effect
    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// Anomalies recovered so far
    pub fn diagnostics(&self) -> &[LowerError] {
        &self.diagnostics
    }

    /// Consume the context, keeping its recovered anomalies
    pub fn into_diagnostics(self) -> Vec<LowerError> {
        self.diagnostics
    }

    /// Apply the anomaly policy to `err`
    ///
    /// Permissive mode logs and records the error; strict mode hands it back.
    pub(crate) fn anomaly(&mut self, err: LowerError) -> Result<(), LowerError> {
        match self.mode {
            ConversionMode::Strict => Err(err),
            ConversionMode::Permissive => {
                warn!(tag = %err.tag(), error = %err, "dropping unconvertible sub-tree");
                self.diagnostics.push(err);
                Ok(())
            }
        }
    }

    /// Apply the anomaly policy to a failed sub-tree, which contributes nothing
    pub(crate) fn recover(&mut self, err: LowerError) -> Result<Lowered, LowerError> {
        self.anomaly(err).map(|()| Lowered::Absent)
    }
}
