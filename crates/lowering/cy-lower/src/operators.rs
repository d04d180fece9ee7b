//! Operator token tables
//!
//! Unrecognised tokens map to the `Unspecified` opcode of each family, never
//! to a real operator.

use cy_syntax::{BinOpKind, BoolOpKind, CmpOpKind};
use tracing::debug;

/// Binary and compound-assignment operators
pub fn bin_op(token: &str) -> BinOpKind {
    match token {
        "+" => BinOpKind::Add,
        "-" => BinOpKind::Sub,
        "*" => BinOpKind::Mult,
        "/" => BinOpKind::Div,
        "@" => BinOpKind::MatMult,
        "&" => BinOpKind::BitAnd,
        "|" => BinOpKind::BitOr,
        "^" => BinOpKind::BitXor,
        other => {
            debug!(token = other, "unmapped binary operator");
            BinOpKind::Unspecified
        }
    }
}

/// Boolean operators
pub fn bool_op(token: &str) -> BoolOpKind {
    match token {
        "or" => BoolOpKind::Or,
        "and" => BoolOpKind::And,
        other => {
            debug!(token = other, "unmapped boolean operator");
            BoolOpKind::Unspecified
        }
    }
}

/// Comparison operators
pub fn cmp_op(token: &str) -> CmpOpKind {
    match token {
        "==" => CmpOpKind::Eq,
        "!=" => CmpOpKind::NotEq,
        "<" => CmpOpKind::Lt,
        "<=" => CmpOpKind::LtE,
        ">" => CmpOpKind::Gt,
        ">=" => CmpOpKind::GtE,
        "in" => CmpOpKind::In,
        "not_in" => CmpOpKind::NotIn,
        "is" => CmpOpKind::Is,
        "is_not" => CmpOpKind::IsNot,
        other => {
            debug!(token = other, "unmapped comparison operator");
            CmpOpKind::Unspecified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_table() {
        let table = [
            ("+", BinOpKind::Add),
            ("-", BinOpKind::Sub),
            ("*", BinOpKind::Mult),
            ("/", BinOpKind::Div),
            ("@", BinOpKind::MatMult),
            ("&", BinOpKind::BitAnd),
            ("|", BinOpKind::BitOr),
            ("^", BinOpKind::BitXor),
        ];
        for (token, expected) in table {
            assert_eq!(bin_op(token), expected, "token {token}");
        }
    }

    #[test]
    fn test_unknown_tokens_never_add() {
        for token in ["//", "%", "**", "<<", ">>", "", "add"] {
            assert_eq!(bin_op(token), BinOpKind::Unspecified, "token {token}");
            assert_ne!(bin_op(token), BinOpKind::Add);
        }
        assert_eq!(bool_op("not"), BoolOpKind::Unspecified);
        assert_eq!(cmp_op("<>"), CmpOpKind::Unspecified);
    }

    #[test]
    fn test_comparison_table() {
        assert_eq!(cmp_op("not_in"), CmpOpKind::NotIn);
        assert_eq!(cmp_op("is_not"), CmpOpKind::IsNot);
        assert_eq!(cmp_op(">="), CmpOpKind::GtE);
        assert_eq!(bool_op("and"), BoolOpKind::And);
        assert_eq!(bool_op("or"), BoolOpKind::Or);
    }
}
