//! Conversion failures

use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use cy_json::ReadError;
use cy_lower::LowerError;
use cy_span::Position;
use miette::Diagnostic;
use thiserror::Error;

/// Why a conversion produced no module
#[derive(Error, Debug, Diagnostic)]
pub enum ConversionError {
    /// The front end output was not a valid document
    #[error(transparent)]
    #[diagnostic(transparent)]
    DocumentParse(#[from] ReadError),

    /// The front end could not be run
    #[error("front end failed: {reason}")]
    #[diagnostic(
        code(convert::front_end),
        help("check that the configured interpreter can import Cython")
    )]
    FrontEnd {
        /// The failure and its causes
        reason: String,
    },

    /// The source has a syntax error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(CompileDiagnostic),

    /// Lowering failed in strict mode
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lowering(#[from] LowerError),
}

/// A syntax error reported by the Cython compiler
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("{message} at {line}:{column}")]
#[diagnostic(code(convert::compile_error))]
pub struct CompileDiagnostic {
    /// Compiler message without location prefix
    pub message: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl CompileDiagnostic {
    /// Where the error was reported
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Convert to a codespan diagnostic for rendering against `source`
    pub fn to_codespan_diagnostic(
        &self,
        file_id: usize,
        source: &str,
    ) -> CodespanDiagnostic<usize> {
        let diagnostic = CodespanDiagnostic::error().with_message(&self.message);
        match self.position().span_in(source) {
            Some(span) => diagnostic.with_labels(vec![
                Label::primary(file_id, span.range()).with_message("syntax error here"),
            ]),
            None => diagnostic.with_notes(vec![format!(
                "reported at line {}, column {}",
                self.line, self.column
            )]),
        }
    }
}
