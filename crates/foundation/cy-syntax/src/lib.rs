//! Canonical Python syntax tree
//!
//! This is the tree shared by navigation, completion and structural diffing.
//! Foreign dialects are lowered into it; nothing in here knows where a node
//! came from.

mod ast;
pub mod compare;
mod display;
mod ops;
pub mod walk;

pub use ast::{
    Arguments, Call, ClassDef, Decorator, Expr, ExprContext, ExprKind, FunctionDef, Keyword,
    Module, NameTok, NameTokContext, Stmt, StmtKind, StrLit, Suite,
};
pub use compare::{PositionPolicy, structurally_equal};
pub use cy_span::Position;
pub use ops::{BinOpKind, BoolOpKind, CmpOpKind};
