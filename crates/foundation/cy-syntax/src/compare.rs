//! Structural comparison of trees
//!
//! Two trees are structurally equal when they render the same nodes with the
//! same fields. Positions take part according to a [`PositionPolicy`]: the
//! front end and the canonical parser disagree about where synthetic suites
//! start, so regression suites usually compare with
//! [`PositionPolicy::IgnoreSuites`].

use crate::ast::{Decorator, Expr, Module, NameTok, Stmt, Suite};
use crate::walk::{VisitorMut, walk_decorator, walk_expr, walk_module, walk_stmt};
use cy_span::Position;

/// Which positions must match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionPolicy {
    /// Every node's position must match
    #[default]
    Exact,
    /// Suite positions are ignored, everything else must match
    IgnoreSuites,
    /// Positions are ignored entirely
    Ignore,
}

/// Compare two modules under a position policy
pub fn structurally_equal(left: &Module, right: &Module, policy: PositionPolicy) -> bool {
    if policy == PositionPolicy::Exact {
        return left == right;
    }
    normalized(left, policy) == normalized(right, policy)
}

/// Copy of `module` with the positions the policy ignores reset
pub fn normalized(module: &Module, policy: PositionPolicy) -> Module {
    let mut copy = module.clone();
    let mut eraser = PositionEraser { policy };
    walk_module(&mut eraser, &mut copy);
    copy
}

struct PositionEraser {
    policy: PositionPolicy,
}

impl PositionEraser {
    fn erase_all(&self) -> bool {
        self.policy == PositionPolicy::Ignore
    }
}

impl VisitorMut for PositionEraser {
    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        if self.erase_all() {
            stmt.pos = Position::UNKNOWN;
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        if self.erase_all() {
            expr.pos = Position::UNKNOWN;
        }
        walk_expr(self, expr);
    }

    fn visit_suite(&mut self, suite: &mut Suite) {
        if self.policy != PositionPolicy::Exact {
            suite.pos = Position::UNKNOWN;
        }
        for stmt in &mut suite.body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_name_tok(&mut self, tok: &mut NameTok) {
        if self.erase_all() {
            tok.pos = Position::UNKNOWN;
        }
    }

    fn visit_decorator(&mut self, decorator: &mut Decorator) {
        if self.erase_all() {
            decorator.pos = Position::UNKNOWN;
        }
        walk_decorator(self, decorator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExprContext, StmtKind};

    fn while_with_else(suite_pos: Position, value_pos: Position) -> Module {
        let test = Expr::reserved("True", Position::new(1, 7));
        let assign = Stmt::new(
            StmtKind::Assign {
                targets: vec![Expr::name("a", ExprContext::Store, Position::new(4, 3))],
                value: Expr::int("10", value_pos),
            },
            Position::new(4, 4),
        );
        Module::new(vec![Stmt::new(
            StmtKind::While {
                test,
                body: vec![Stmt::new(StmtKind::Pass, Position::new(2, 3))],
                orelse: Some(Suite::new(vec![assign], suite_pos)),
            },
            Position::new(1, 1),
        )])
    }

    #[test]
    fn test_suite_positions_can_be_ignored() {
        let left = while_with_else(Position::new(3, 1), Position::new(4, 5));
        let right = while_with_else(Position::new(4, 3), Position::new(4, 5));

        assert!(!structurally_equal(&left, &right, PositionPolicy::Exact));
        assert!(structurally_equal(&left, &right, PositionPolicy::IgnoreSuites));
    }

    #[test]
    fn test_ignore_suites_still_checks_other_nodes() {
        let left = while_with_else(Position::new(3, 1), Position::new(4, 5));
        let right = while_with_else(Position::new(3, 1), Position::new(4, 6));

        assert!(!structurally_equal(&left, &right, PositionPolicy::IgnoreSuites));
        assert!(structurally_equal(&left, &right, PositionPolicy::Ignore));
    }
}
