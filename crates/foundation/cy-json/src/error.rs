//! Errors raised while reading a foreign document

use miette::Diagnostic;
use thiserror::Error;

/// The document could not be read as JSON
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ReadError {
    /// Syntax or encoding error in the JSON text
    #[error("malformed JSON document: {reason}")]
    #[diagnostic(code(json::malformed))]
    Malformed {
        /// Message from the JSON parser
        reason: String,
        /// 1-based line of the failure
        line: usize,
        /// 1-based column of the failure
        column: usize,
    },
}

impl From<serde_json::Error> for ReadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            reason: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}
