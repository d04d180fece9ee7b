//! Mutable tree traversal
//!
//! Override the `visit_*` hooks you care about and call the matching `walk_*`
//! function to keep descending.

use crate::ast::{
    Arguments, Decorator, Expr, ExprKind, Keyword, Module, NameTok, Stmt, StmtKind, Suite,
};

/// Visitor over every node of a tree
pub trait VisitorMut {
    /// Called for each statement
    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        walk_stmt(self, stmt);
    }

    /// Called for each expression
    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr);
    }

    /// Called for each suite
    fn visit_suite(&mut self, suite: &mut Suite) {
        walk_stmts(self, &mut suite.body);
    }

    /// Called for each identifier token
    fn visit_name_tok(&mut self, _tok: &mut NameTok) {}

    /// Called for each decorator
    fn visit_decorator(&mut self, decorator: &mut Decorator) {
        walk_decorator(self, decorator);
    }
}

/// Visit every top-level statement of a module
pub fn walk_module<V: VisitorMut + ?Sized>(visitor: &mut V, module: &mut Module) {
    walk_stmts(visitor, &mut module.body);
}

fn walk_stmts<V: VisitorMut + ?Sized>(visitor: &mut V, stmts: &mut [Stmt]) {
    for stmt in stmts {
        visitor.visit_stmt(stmt);
    }
}

fn walk_exprs<V: VisitorMut + ?Sized>(visitor: &mut V, exprs: &mut [Expr]) {
    for expr in exprs {
        visitor.visit_expr(expr);
    }
}

fn walk_opt_exprs<V: VisitorMut + ?Sized>(visitor: &mut V, exprs: &mut [Option<Expr>]) {
    for expr in exprs.iter_mut().flatten() {
        visitor.visit_expr(expr);
    }
}

fn walk_keywords<V: VisitorMut + ?Sized>(visitor: &mut V, keywords: &mut [Keyword]) {
    for keyword in keywords {
        visitor.visit_name_tok(&mut keyword.arg);
        visitor.visit_expr(&mut keyword.value);
    }
}

fn walk_arguments<V: VisitorMut + ?Sized>(visitor: &mut V, args: &mut Arguments) {
    walk_exprs(visitor, &mut args.args);
    walk_opt_exprs(visitor, &mut args.defaults);
    walk_opt_exprs(visitor, &mut args.annotations);
    if let Some(vararg) = &mut args.vararg {
        visitor.visit_name_tok(vararg);
    }
    if let Some(kwarg) = &mut args.kwarg {
        visitor.visit_name_tok(kwarg);
    }
    walk_exprs(visitor, &mut args.kwonlyargs);
    walk_opt_exprs(visitor, &mut args.kw_defaults);
    walk_opt_exprs(visitor, &mut args.kwonly_annotations);
}

/// Descend into a decorator's children
pub fn walk_decorator<V: VisitorMut + ?Sized>(visitor: &mut V, decorator: &mut Decorator) {
    visitor.visit_expr(&mut decorator.func);
    walk_exprs(visitor, &mut decorator.args);
    walk_keywords(visitor, &mut decorator.keywords);
    if let Some(starargs) = &mut decorator.starargs {
        visitor.visit_expr(starargs);
    }
    if let Some(kwargs) = &mut decorator.kwargs {
        visitor.visit_expr(kwargs);
    }
}

/// Descend into a statement's children
pub fn walk_stmt<V: VisitorMut + ?Sized>(visitor: &mut V, stmt: &mut Stmt) {
    match &mut stmt.kind {
        StmtKind::Assign { targets, value } => {
            walk_exprs(visitor, targets);
            visitor.visit_expr(value);
        }
        StmtKind::AugAssign { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        StmtKind::Expr(value) => visitor.visit_expr(value),
        StmtKind::Pass => {}
        StmtKind::If { test, body, orelse } | StmtKind::While { test, body, orelse } => {
            visitor.visit_expr(test);
            walk_stmts(visitor, body);
            if let Some(suite) = orelse {
                visitor.visit_suite(suite);
            }
        }
        StmtKind::For {
            target,
            iter,
            body,
            orelse,
            ..
        } => {
            visitor.visit_expr(target);
            visitor.visit_expr(iter);
            walk_stmts(visitor, body);
            if let Some(suite) = orelse {
                visitor.visit_suite(suite);
            }
        }
        StmtKind::Assert { test, msg } => {
            visitor.visit_expr(test);
            if let Some(msg) = msg {
                visitor.visit_expr(msg);
            }
        }
        StmtKind::Return { value } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::FunctionDef(def) => {
            for decorator in &mut def.decorators {
                visitor.visit_decorator(decorator);
            }
            visitor.visit_name_tok(&mut def.name);
            walk_arguments(visitor, &mut def.args);
            walk_stmts(visitor, &mut def.body);
        }
        StmtKind::ClassDef(def) => {
            for decorator in &mut def.decorators {
                visitor.visit_decorator(decorator);
            }
            visitor.visit_name_tok(&mut def.name);
            walk_exprs(visitor, &mut def.bases);
            walk_stmts(visitor, &mut def.body);
        }
    }
}

/// Descend into an expression's children
pub fn walk_expr<V: VisitorMut + ?Sized>(visitor: &mut V, expr: &mut Expr) {
    match &mut expr.kind {
        ExprKind::Name { .. } | ExprKind::Num(_) => {}
        ExprKind::Str(lit) => walk_stmts(visitor, &mut lit.fstring_nodes),
        ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. } | ExprKind::Set { elts } => {
            walk_exprs(visitor, elts);
        }
        ExprKind::Dict { keys, values } => {
            walk_exprs(visitor, keys);
            walk_exprs(visitor, values);
        }
        ExprKind::Call(call) => {
            visitor.visit_expr(&mut call.func);
            walk_exprs(visitor, &mut call.args);
            walk_keywords(visitor, &mut call.keywords);
            if let Some(starargs) = &mut call.starargs {
                visitor.visit_expr(starargs);
            }
            if let Some(kwargs) = &mut call.kwargs {
                visitor.visit_expr(kwargs);
            }
        }
        ExprKind::BinOp { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::BoolOp { values, .. } => walk_exprs(visitor, values),
        ExprKind::Compare {
            left, comparators, ..
        } => {
            visitor.visit_expr(left);
            walk_exprs(visitor, comparators);
        }
        ExprKind::IfExp { test, body, orelse } => {
            visitor.visit_expr(test);
            visitor.visit_expr(body);
            visitor.visit_expr(orelse);
        }
        ExprKind::Await { value } => visitor.visit_expr(value),
        ExprKind::Yield { value } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
    }
}
