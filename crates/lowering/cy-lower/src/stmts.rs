//! Simple and compound statements

use crate::context::LoweringContext;
use crate::dispatch::{lower_field, lower_object, optional_expr, required_expr, stmts_field};
use crate::error::LowerError;
use crate::lowered::Lowered;
use crate::operators::bin_op;
use crate::position::position_of;
use crate::STAT_LIST;
use cy_json::{TaggedObject, TaggedValue};
use cy_span::Position;
use cy_syntax::{ExprContext, Stmt, StmtKind, Suite};

/// `PassStat`
pub(crate) fn lower_pass(object: &TaggedObject) -> Stmt {
    Stmt::new(StmtKind::Pass, position_of(object))
}

/// `StatList`: a statement group spliced into its holder
pub(crate) fn lower_stat_list(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Lowered, LowerError> {
    let nodes = lower_field(ctx, object, "stats", ExprContext::Load)?.into_nodes(object)?;
    Ok(Lowered::Sequence(nodes))
}

/// `ExprStat`: the expression takes the statement's position
pub(crate) fn lower_expr_stat(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let mut value = required_expr(ctx, object, "expr", ExprContext::Load)?;
    value.pos = position_of(object);
    Ok(Stmt::expr(value))
}

/// `SingleAssignment`
pub(crate) fn lower_assignment(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let target = required_expr(ctx, object, "lhs", ExprContext::Store)?;
    let value = required_expr(ctx, object, "rhs", ExprContext::Load)?;
    let kind = StmtKind::Assign {
        targets: vec![target],
        value,
    };
    Ok(Stmt::new(kind, position_of(object)))
}

/// `InPlaceAssignment`
pub(crate) fn lower_aug_assignment(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let target = required_expr(ctx, object, "lhs", ExprContext::AugStore)?;
    let value = required_expr(ctx, object, "rhs", ExprContext::Load)?;
    let op = object
        .field_str("operator")
        .ok_or_else(|| LowerError::malformed(object, "missing `operator`"))?;
    let kind = StmtKind::AugAssign {
        target,
        op: bin_op(op),
        value,
    };
    Ok(Stmt::new(kind, position_of(object)))
}

/// `IfStat`: clauses chain through synthetic `else` suites
pub(crate) fn lower_if(ctx: &mut LoweringContext, object: &TaggedObject) -> Result<Stmt, LowerError> {
    let clauses = object
        .present("if_clauses")
        .and_then(TaggedValue::as_array)
        .unwrap_or_default();

    let mut lowered = Vec::with_capacity(clauses.len());
    for clause in clauses {
        let clause = clause
            .as_object()
            .ok_or_else(|| LowerError::malformed(object, "`if_clauses` entry is not an object"))?;
        let test = required_expr(ctx, clause, "condition", ExprContext::Load)?;
        let body = stmts_field(ctx, clause, "body")?;
        lowered.push((test, body, position_of(clause)));
    }
    if lowered.is_empty() {
        return Err(LowerError::malformed(object, "no `if_clauses`"));
    }

    let mut else_suite = match object.present("else_clause") {
        Some(_) => Some(Suite::new(
            stmts_field(ctx, object, "else_clause")?,
            Position::UNKNOWN,
        )),
        None => None,
    };
    let mut chained: Option<Stmt> = None;
    while let Some((test, body, pos)) = lowered.pop() {
        let orelse = match chained.take() {
            Some(inner) => Some(Suite::new(vec![inner], Position::UNKNOWN)),
            None => else_suite.take(),
        };
        chained = Some(Stmt::new(StmtKind::If { test, body, orelse }, pos));
    }
    chained.ok_or_else(|| LowerError::malformed(object, "no `if_clauses`"))
}

/// `WhileStat`
pub(crate) fn lower_while(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let test = required_expr(ctx, object, "condition", ExprContext::Load)?;
    let body = stmts_field(ctx, object, "body")?;
    let else_body = stmts_field(ctx, object, "else_clause")?;
    let orelse = (!else_body.is_empty()).then(|| Suite::new(else_body, Position::UNKNOWN));
    Ok(Stmt::new(
        StmtKind::While { test, body, orelse },
        position_of(object),
    ))
}

/// `ForInStat` and `AsyncForStat`
pub(crate) fn lower_for(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    async_tag: bool,
) -> Result<Stmt, LowerError> {
    let target = required_expr(ctx, object, "target", ExprContext::Store)?;
    let iterator = object
        .field_object("iterator")
        .ok_or_else(|| LowerError::malformed(object, "missing `iterator`"))?;
    let iter = required_expr(ctx, iterator, "sequence", ExprContext::Load)?;
    let body = stmts_field(ctx, object, "body")?;
    let orelse = match object.field_object("else_clause") {
        Some(else_clause) => else_suite(ctx, else_clause)?,
        None => None,
    };
    let kind = StmtKind::For {
        target,
        iter,
        body,
        orelse,
        is_async: async_tag || object.field_flag("is_async"),
    };
    Ok(Stmt::new(kind, position_of(object)))
}

/// An `else` block; a statement list keeps its own position
fn else_suite(
    ctx: &mut LoweringContext,
    else_clause: &TaggedObject,
) -> Result<Option<Suite>, LowerError> {
    if else_clause.is_tagged(STAT_LIST) {
        let body = stmts_field(ctx, else_clause, "stats")?;
        return Ok(Some(Suite::new(body, position_of(else_clause))));
    }
    let mut body = Vec::new();
    lower_object(ctx, else_clause, ExprContext::Load)?.push_stmts(&mut body, else_clause)?;
    Ok((!body.is_empty()).then(|| Suite::new(body, Position::UNKNOWN)))
}

/// `AssertStat`
pub(crate) fn lower_assert(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let test = required_expr(ctx, object, "cond", ExprContext::Load)?;
    let msg = optional_expr(ctx, object, "value", ExprContext::Load)?;
    Ok(Stmt::new(StmtKind::Assert { test, msg }, position_of(object)))
}

/// `ReturnStat`
pub(crate) fn lower_return(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let value = optional_expr(ctx, object, "value", ExprContext::Load)?;
    Ok(Stmt::new(StmtKind::Return { value }, position_of(object)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConversionMode;
    use cy_syntax::{BinOpKind, Expr};
    use expect_test::expect;

    fn lower(json: &str) -> Vec<Stmt> {
        let value = cy_json::read(json).unwrap();
        let object = value.as_object().unwrap();
        let mut ctx = LoweringContext::new(ConversionMode::Strict);
        let mut out = Vec::new();
        lower_object(&mut ctx, object, ExprContext::Load)
            .unwrap()
            .push_stmts(&mut out, object)
            .unwrap();
        out
    }

    #[test]
    fn test_assignment() {
        let stmts = lower(
            r#"{"__node__": "SingleAssignment", "line": 1, "col": 4,
                "lhs": {"__node__": "Name", "line": 1, "col": 0, "name": "a"},
                "rhs": {"__node__": "Int", "line": 1, "col": 4, "value": "10"}}"#,
        );
        assert_eq!(
            stmts,
            [Stmt::new(
                StmtKind::Assign {
                    targets: vec![Expr::name("a", ExprContext::Store, Position::new(1, 1))],
                    value: Expr::int("10", Position::new(1, 5)),
                },
                Position::new(1, 5),
            )]
        );
    }

    #[test]
    fn test_expr_stat_overrides_position() {
        let stmts = lower(
            r#"{"__node__": "ExprStat", "line": 3, "col": 0,
                "expr": {"__node__": "Name", "line": 3, "col": 7, "name": "x"}}"#,
        );
        assert_eq!(stmts[0].pos, Position::new(3, 1));
        let StmtKind::Expr(value) = &stmts[0].kind else {
            panic!("expected an expression statement");
        };
        assert_eq!(value.pos, Position::new(3, 1));
    }

    #[test]
    fn test_if_elif_else_chain() {
        let stmts = lower(
            r#"{"__node__": "IfStat", "line": 1, "col": 0,
                "if_clauses": [
                    {"__node__": "IfClause", "line": 1, "col": 0,
                     "condition": {"__node__": "Name", "line": 1, "col": 3, "name": "a"},
                     "body": {"__node__": "PassStat", "line": 2, "col": 4}},
                    {"__node__": "IfClause", "line": 3, "col": 0,
                     "condition": {"__node__": "Name", "line": 3, "col": 5, "name": "b"},
                     "body": {"__node__": "StatList", "stats": [
                        {"__node__": "PassStat", "line": 4, "col": 4}]}}
                ],
                "else_clause": {"__node__": "PassStat", "line": 6, "col": 4}}"#,
        );
        let rendered = stmts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        expect![[r#"If[test=Name[id=a, ctx=Load, reserved=false], body=[Pass], orelse=Suite[body=[If[test=Name[id=b, ctx=Load, reserved=false], body=[Pass], orelse=Suite[body=[Pass]]]]]]"#]]
            .assert_eq(&rendered);
    }

    #[test]
    fn test_while_else_only_when_non_empty() {
        let stmts = lower(
            r#"{"__node__": "WhileStat", "line": 1, "col": 0,
                "condition": {"__node__": "Bool", "line": 1, "col": 6, "value": "True"},
                "body": {"__node__": "PassStat", "line": 2, "col": 4},
                "else_clause": "None"}"#,
        );
        let StmtKind::While { orelse, .. } = &stmts[0].kind else {
            panic!("expected a while loop");
        };
        assert!(orelse.is_none());
    }

    #[test]
    fn test_for_reads_nested_sequence() {
        let stmts = lower(
            r#"{"__node__": "AsyncForStat", "line": 1, "col": 6, "is_async": "True",
                "target": {"__node__": "Name", "line": 1, "col": 10, "name": "x"},
                "iterator": {"__node__": "Iterator", "line": 1, "col": 15,
                    "sequence": {"__node__": "Name", "line": 1, "col": 15, "name": "xs"}},
                "body": {"__node__": "StatList", "stats": []},
                "else_clause": {"__node__": "StatList", "line": 3, "col": 4, "stats": [
                    {"__node__": "PassStat", "line": 4, "col": 4}]}}"#,
        );
        let StmtKind::For {
            target,
            iter,
            orelse,
            is_async,
            ..
        } = &stmts[0].kind
        else {
            panic!("expected a for loop");
        };
        assert!(*is_async);
        assert_eq!(*target, Expr::name("x", ExprContext::Store, Position::new(1, 11)));
        assert_eq!(iter.name_id(), Some("xs"));
        assert_eq!(orelse.as_ref().map(|suite| suite.pos), Some(Position::new(3, 5)));
    }

    #[test]
    fn test_aug_assignment_operator() {
        let stmts = lower(
            r#"{"__node__": "InPlaceAssignment", "line": 1, "col": 0, "operator": "^",
                "lhs": {"__node__": "Name", "line": 1, "col": 0, "name": "a"},
                "rhs": {"__node__": "Int", "line": 1, "col": 5, "value": "1"}}"#,
        );
        let StmtKind::AugAssign { target, op, .. } = &stmts[0].kind else {
            panic!("expected an augmented assignment");
        };
        assert_eq!(*op, BinOpKind::BitXor);
        assert_eq!(*target, Expr::name("a", ExprContext::AugStore, Position::new(1, 1)));
    }

    #[test]
    fn test_assert_with_and_without_message() {
        let stmts = lower(
            r#"{"__node__": "StatList", "stats": [
                {"__node__": "AssertStat", "line": 1, "col": 0,
                 "cond": {"__node__": "Name", "line": 1, "col": 7, "name": "ok"},
                 "value": {"__node__": "Unicode", "line": 1, "col": 11, "value": "bad"}},
                {"__node__": "AssertStat", "line": 2, "col": 0,
                 "cond": {"__node__": "Name", "line": 2, "col": 7, "name": "ok"},
                 "value": "None"}]}"#,
        );
        let rendered = stmts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        expect![[r#"
            Assert[test=Name[id=ok, ctx=Load, reserved=false], msg=Str[s=bad, unicode=true, raw=false, binary=false, fstring=false, fstring_nodes=[]]]
            Assert[test=Name[id=ok, ctx=Load, reserved=false], msg=null]"#]]
        .assert_eq(&rendered);
        assert_eq!(stmts[1].pos, Position::new(2, 1));
    }

    #[test]
    fn test_return_value_is_optional() {
        let stmts = lower(
            r#"{"__node__": "ReturnStat", "line": 4, "col": 4,
                "value": {"__node__": "Name", "line": 4, "col": 11, "name": "x"}}"#,
        );
        assert_eq!(
            stmts,
            [Stmt::new(
                StmtKind::Return {
                    value: Some(Expr::name("x", ExprContext::Load, Position::new(4, 12))),
                },
                Position::new(4, 5),
            )]
        );

        let stmts = lower(r#"{"__node__": "ReturnStat", "line": 4, "col": 4, "value": null}"#);
        assert_eq!(stmts[0].to_string(), "Return[value=null]");
    }
}
