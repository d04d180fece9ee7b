//! Results of lowering one foreign value
//!
//! Foreign statement groups and comparison chain links have no canonical
//! counterpart. They only exist as [`Lowered`] variants and are unwrapped by
//! the `push_*`/`into_*` adapters before anything reaches the tree.

use crate::error::LowerError;
use cy_json::TaggedObject;
use cy_syntax::{CmpOpKind, Expr, Stmt, StmtKind};

/// A canonical node of either category
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Stmt(Stmt),
    Expr(Expr),
}

/// One link of a chained comparison, `op operand [next]`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CascadeLink {
    pub op: CmpOpKind,
    pub operand: Expr,
    pub next: Option<Box<CascadeLink>>,
}

impl CascadeLink {
    /// Operators and operands of the chain, in source order
    pub fn unzip(self) -> (Vec<CmpOpKind>, Vec<Expr>) {
        let mut ops = Vec::new();
        let mut operands = Vec::new();
        let mut link = Some(Box::new(self));
        while let Some(current) = link {
            let CascadeLink { op, operand, next } = *current;
            ops.push(op);
            operands.push(operand);
            link = next;
        }
        (ops, operands)
    }
}

/// What a foreign value lowered to
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lowered {
    /// No node: an absent value or a dropped sub-tree
    Absent,
    Node(Node),
    /// A statement group, spliced into whatever holds it
    Sequence(Vec<Node>),
    /// A comparison chain link, only meaningful inside a comparison
    Cascade(CascadeLink),
}

impl From<Stmt> for Lowered {
    fn from(stmt: Stmt) -> Self {
        Self::Node(Node::Stmt(stmt))
    }
}

impl From<Expr> for Lowered {
    fn from(expr: Expr) -> Self {
        Self::Node(Node::Expr(expr))
    }
}

impl Node {
    fn into_stmt(self) -> Stmt {
        match self {
            Self::Stmt(stmt) => stmt,
            Self::Expr(expr) => Stmt::expr(expr),
        }
    }

    fn into_expr(self, owner: &TaggedObject) -> Result<Expr, LowerError> {
        match self {
            Self::Expr(expr) => Ok(expr),
            Self::Stmt(Stmt {
                kind: StmtKind::Expr(expr),
                ..
            }) => Ok(expr),
            Self::Stmt(_) => Err(LowerError::malformed(
                owner,
                "statement found where an expression was expected",
            )),
        }
    }
}

impl Lowered {
    /// Append to a statement list, splicing groups and wrapping expressions
    pub fn push_stmts(self, out: &mut Vec<Stmt>, owner: &TaggedObject) -> Result<(), LowerError> {
        match self {
            Self::Absent => {}
            Self::Node(node) => out.push(node.into_stmt()),
            Self::Sequence(nodes) => out.extend(nodes.into_iter().map(Node::into_stmt)),
            Self::Cascade(_) => return Err(stray_cascade(owner)),
        }
        Ok(())
    }

    /// Append to an expression list, splicing groups
    pub fn push_exprs(self, out: &mut Vec<Expr>, owner: &TaggedObject) -> Result<(), LowerError> {
        match self {
            Self::Absent => {}
            Self::Node(node) => out.push(node.into_expr(owner)?),
            Self::Sequence(nodes) => {
                for node in nodes {
                    out.push(node.into_expr(owner)?);
                }
            }
            Self::Cascade(_) => return Err(stray_cascade(owner)),
        }
        Ok(())
    }

    /// The single expression this lowered to, if any
    pub fn into_expr(self, owner: &TaggedObject) -> Result<Option<Expr>, LowerError> {
        match self {
            Self::Absent => Ok(None),
            Self::Node(node) => node.into_expr(owner).map(Some),
            Self::Sequence(mut nodes) if nodes.len() <= 1 => {
                nodes.pop().map(|node| node.into_expr(owner)).transpose()
            }
            Self::Sequence(_) => Err(LowerError::malformed(
                owner,
                "statement group found where one expression was expected",
            )),
            Self::Cascade(_) => Err(stray_cascade(owner)),
        }
    }

    /// The comparison chain this lowered to, if any
    pub fn into_cascade(self, owner: &TaggedObject) -> Result<Option<CascadeLink>, LowerError> {
        match self {
            Self::Absent => Ok(None),
            Self::Cascade(link) => Ok(Some(link)),
            _ => Err(LowerError::malformed(
                owner,
                "`cascade` is not a comparison chain",
            )),
        }
    }

    /// Flatten into the nodes of a statement group
    pub fn into_nodes(self, owner: &TaggedObject) -> Result<Vec<Node>, LowerError> {
        match self {
            Self::Absent => Ok(Vec::new()),
            Self::Node(node) => Ok(vec![node]),
            Self::Sequence(nodes) => Ok(nodes),
            Self::Cascade(_) => Err(stray_cascade(owner)),
        }
    }
}

fn stray_cascade(owner: &TaggedObject) -> LowerError {
    LowerError::malformed(owner, "comparison chain link outside a comparison")
}
