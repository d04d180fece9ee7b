//! Shared helpers for the end-to-end conversion tests
//!
//! The fixtures under `tests/fixtures` are documents as the Cython helper
//! prints them, so the tests run without a Python installation.

use cy_driver::{ConversionMode, ConversionResult, Converter};
use lang_cython::FrontEnd;

/// Front end that replays a recorded document
#[derive(Debug, Clone)]
pub struct RecordedFrontEnd {
    document: String,
}

impl RecordedFrontEnd {
    /// Replay `document` for every source
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl FrontEnd for RecordedFrontEnd {
    fn name(&self) -> &'static str {
        "recorded"
    }

    fn extensions(&self) -> &[&'static str] {
        &["pyx"]
    }

    fn to_json(&self, _source: &str) -> anyhow::Result<String> {
        Ok(self.document.clone())
    }
}

/// Convert `source` using the recorded `document`
pub fn convert_recorded(
    source: &str,
    document: &str,
    mode: ConversionMode,
) -> ConversionResult {
    Converter::new(RecordedFrontEnd::new(document), mode).convert(source, 1)
}

/// Convert a recorded document in strict mode and return the module
///
/// # Panics
///
/// Panics if the conversion does not produce a module.
pub fn convert_strict(source: &str, document: &str) -> cy_syntax::Module {
    let result = convert_recorded(source, document, ConversionMode::Strict);
    match (result.ast, result.error) {
        (Some(module), None) => module,
        (_, Some(err)) => panic!("conversion of {source:?} failed: {err}"),
        (None, None) => panic!("conversion of {source:?} produced nothing"),
    }
}
