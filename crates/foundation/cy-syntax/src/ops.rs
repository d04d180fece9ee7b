//! Operator kinds

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Binary and compound-assignment operators
///
/// `Unspecified` stands for a token outside the known vocabulary. It is kept
/// distinct from every real operator so an unknown token never reads as `Add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum BinOpKind {
    /// Operator token not recognised
    #[default]
    Unspecified,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mult,
    /// `/`
    Div,
    /// `@`
    MatMult,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
}

/// Short-circuit boolean operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum BoolOpKind {
    /// Operator token not recognised
    #[default]
    Unspecified,
    /// `or`
    Or,
    /// `and`
    And,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum CmpOpKind {
    /// Operator token not recognised
    #[default]
    Unspecified,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtE,
    /// `>`
    Gt,
    /// `>=`
    GtE,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `in`
    In,
    /// `not in`
    NotIn,
}
