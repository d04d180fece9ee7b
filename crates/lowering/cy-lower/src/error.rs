//! Errors raised while lowering the foreign tree

use crate::position::position_of;
use cy_json::{TaggedObject, TaggedValue};
use cy_span::Position;
use miette::Diagnostic;
use thiserror::Error;

/// A sub-tree that could not be lowered
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum LowerError {
    /// The discriminator names a node kind with no constructor
    #[error("unknown node tag `{tag}` at {position}")]
    #[diagnostic(
        code(lower::unknown_tag),
        help("the converter has no constructor for this node kind")
    )]
    UnknownNodeTag {
        /// The unrecognised discriminator
        tag: String,
        /// Canonical position of the node, if it had one
        position: Position,
        /// The offending sub-tree as pretty JSON
        subtree: String,
    },

    /// A recognised node is missing fields or has ill-typed ones
    #[error("malformed `{tag}` node at {position}: {reason}")]
    #[diagnostic(code(lower::malformed_node))]
    MalformedNodeShape {
        /// Discriminator of the node
        tag: String,
        /// What was wrong with it
        reason: String,
        /// Canonical position of the node, if it had one
        position: Position,
    },

    /// The document root is not a statement list
    #[error("expected a `StatList` document root, found `{found}`")]
    #[diagnostic(code(lower::unexpected_root))]
    UnexpectedRoot {
        /// Discriminator of the root
        found: String,
    },
}

impl LowerError {
    /// Malformed-shape error for `object`
    pub(crate) fn malformed(object: &TaggedObject, reason: impl Into<String>) -> Self {
        Self::MalformedNodeShape {
            tag: object.tag().unwrap_or("untagged object").to_owned(),
            reason: reason.into(),
            position: position_of(object),
        }
    }

    /// Unknown-tag error for `object`
    pub(crate) fn unknown(tag: &str, object: &TaggedObject) -> Self {
        Self::UnknownNodeTag {
            tag: tag.to_owned(),
            position: position_of(object),
            subtree: TaggedValue::Object(object.clone()).to_pretty_string(),
        }
    }

    /// Discriminator the error is about
    pub fn tag(&self) -> &str {
        match self {
            Self::UnknownNodeTag { tag, .. } | Self::MalformedNodeShape { tag, .. } => tag,
            Self::UnexpectedRoot { found } => found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_names_untagged_objects() {
        let err = LowerError::malformed(&TaggedObject::new(None), "no discriminator");
        assert_eq!(err.tag(), "untagged object");
        assert_eq!(
            err.to_string(),
            "malformed `untagged object` node at 0:0: no discriminator"
        );
    }
}
