//! Conversion driver
//!
//! This crate ties the pipeline together: the front end turns source text
//! into a JSON parse tree, `cy-json` reads it and `cy-lower` builds the
//! canonical module. The outcome is returned in a [`ConversionResult`]
//! stamped with the caller's source version.

pub mod config;
pub mod error;

pub use config::ConverterConfig;
pub use cy_lower::ConversionMode;
pub use error::{CompileDiagnostic, ConversionError};

use cy_json::TaggedObject;
use cy_lower::{LowerError, LoweringContext, lower_module};
use cy_syntax::Module;
use lang_cython::{CythonFrontEnd, FrontEnd, normalize_newlines};
use tracing::{debug, warn};

/// Tag of a document reporting a syntax error in the source
const COMPILE_ERROR: &str = "CompileError";

/// Outcome of one conversion
///
/// On success `ast` is set and `error` is empty. On failure `error` is set
/// and `ast` is empty. When the front end returned a document that is not a
/// statement list, both are empty.
#[derive(Debug)]
pub struct ConversionResult {
    /// The converted module
    pub ast: Option<Module>,
    /// Why nothing was converted
    pub error: Option<ConversionError>,
    /// The source version passed in, echoed back for caching
    pub source_version: u64,
    /// Anomalies recovered from in permissive mode
    pub diagnostics: Vec<LowerError>,
}

impl ConversionResult {
    fn success(module: Module, source_version: u64, diagnostics: Vec<LowerError>) -> Self {
        Self {
            ast: Some(module),
            error: None,
            source_version,
            diagnostics,
        }
    }

    fn failure(error: ConversionError, source_version: u64) -> Self {
        Self {
            ast: None,
            error: Some(error),
            source_version,
            diagnostics: Vec::new(),
        }
    }

    fn nothing(source_version: u64) -> Self {
        Self {
            ast: None,
            error: None,
            source_version,
            diagnostics: Vec::new(),
        }
    }

    /// Whether neither a module nor an error was produced
    pub fn is_empty(&self) -> bool {
        self.ast.is_none() && self.error.is_none()
    }
}

/// Converts Cython sources to canonical modules
#[derive(Debug, Clone, Default)]
pub struct Converter<F = CythonFrontEnd> {
    front_end: F,
    mode: ConversionMode,
}

impl Converter<CythonFrontEnd> {
    /// Create a converter running the configured helper script
    #[must_use]
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(CythonFrontEnd::new(config.front_end.clone()), config.mode)
    }
}

impl<F: FrontEnd> Converter<F> {
    /// Create a converter over any front end
    pub fn new(front_end: F, mode: ConversionMode) -> Self {
        Self { front_end, mode }
    }

    /// The anomaly policy used for every conversion
    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// Convert source text
    ///
    /// Line endings are normalised before the front end sees the text.
    pub fn convert(&self, source: &str, source_version: u64) -> ConversionResult {
        debug!(
            front_end = self.front_end.name(),
            bytes = source.len(),
            source_version,
            "converting source"
        );
        let source = normalize_newlines(source);
        match self.front_end.to_json(&source) {
            Ok(json) => self.convert_json(&json, source_version),
            Err(err) => ConversionResult::failure(
                ConversionError::FrontEnd {
                    reason: format!("{err:#}"),
                },
                source_version,
            ),
        }
    }

    /// Convert a JSON document already produced by the front end
    pub fn convert_json(&self, json: &str, source_version: u64) -> ConversionResult {
        let document = match cy_json::read(json) {
            Ok(document) => document,
            Err(err) => return ConversionResult::failure(err.into(), source_version),
        };

        let Some(root) = document.as_object() else {
            return self.unexpected_root(document.kind_name(), source_version);
        };
        if root.is_tagged(COMPILE_ERROR) {
            let diagnostic = compile_diagnostic(root);
            debug!(error = %diagnostic, "front end reported a compile error");
            return ConversionResult::failure(ConversionError::Compile(diagnostic), source_version);
        }

        let mut ctx = LoweringContext::new(self.mode);
        match lower_module(&mut ctx, root) {
            Ok(module) => ConversionResult::success(module, source_version, ctx.into_diagnostics()),
            Err(LowerError::UnexpectedRoot { found }) => self.unexpected_root(&found, source_version),
            Err(err) => match self.mode {
                ConversionMode::Strict => ConversionResult::failure(err.into(), source_version),
                ConversionMode::Permissive => {
                    warn!(error = %err, "unable to convert document");
                    ConversionResult::nothing(source_version)
                }
            },
        }
    }

    fn unexpected_root(&self, found: &str, source_version: u64) -> ConversionResult {
        let err = LowerError::UnexpectedRoot {
            found: found.to_owned(),
        };
        match self.mode {
            ConversionMode::Strict => ConversionResult::failure(err.into(), source_version),
            ConversionMode::Permissive => {
                warn!(root = found, "expected a statement list as document root");
                ConversionResult::nothing(source_version)
            }
        }
    }
}

fn compile_diagnostic(root: &TaggedObject) -> CompileDiagnostic {
    let position = cy_lower::position_of(root);
    CompileDiagnostic {
        message: root
            .field_str("message_only")
            .or_else(|| root.field_str("message"))
            .unwrap_or("syntax error")
            .to_owned(),
        line: position.line,
        column: position.column,
    }
}
