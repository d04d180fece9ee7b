//! Calls, operators and the other compound expressions

use crate::context::LoweringContext;
use crate::dispatch::{exprs_field, lower_field, optional_expr, required_expr};
use crate::error::LowerError;
use crate::literals::dict_items;
use crate::lowered::CascadeLink;
use crate::operators::{bin_op, bool_op, cmp_op};
use crate::position::position_of;
use cy_json::TaggedObject;
use cy_syntax::{Call, Expr, ExprContext, ExprKind, Keyword, NameTok, NameTokContext};

fn operator<'object>(object: &'object TaggedObject) -> Result<&'object str, LowerError> {
    object
        .field_str("operator")
        .ok_or_else(|| LowerError::malformed(object, "missing `operator`"))
}

/// `SimpleCall`: `function(args...)`
pub(crate) fn lower_simple_call(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let func = required_expr(ctx, object, "function", ExprContext::Load)?;
    let args = exprs_field(ctx, object, "args", ExprContext::Load)?;
    Ok(Expr::new(
        ExprKind::Call(Call::positional(func, args)),
        position_of(object),
    ))
}

/// `GeneralCall`: a call with star or keyword arguments
///
/// `positional_args` is an array, a `Tuple`, or an `AsTuple` wrapping the
/// star argument. `keyword_args` is a `Dict` with string keys, anything else
/// being the double-star argument.
pub(crate) fn lower_general_call(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let func = required_expr(ctx, object, "function", ExprContext::Load)?;
    let mut call = Call::positional(func, Vec::new());

    match object.field_object("positional_args") {
        Some(positional) if positional.is_tagged("Tuple") => {
            call.args = exprs_field(ctx, positional, "args", ExprContext::Load)?;
        }
        Some(positional) if positional.is_tagged("AsTuple") => {
            call.starargs = optional_expr(ctx, positional, "arg", ExprContext::Load)?.map(Box::new);
        }
        _ => call.args = exprs_field(ctx, object, "positional_args", ExprContext::Load)?,
    }

    match object.field_object("keyword_args") {
        Some(keywords) if keywords.is_tagged("Dict") => {
            for item in dict_items(keywords)? {
                call.keywords.push(keyword(ctx, item)?);
            }
        }
        _ => {
            call.kwargs = optional_expr(ctx, object, "keyword_args", ExprContext::Load)?.map(Box::new);
        }
    }

    Ok(Expr::new(ExprKind::Call(call), position_of(object)))
}

fn keyword(ctx: &mut LoweringContext, item: &TaggedObject) -> Result<Keyword, LowerError> {
    let key = item
        .field_object("key")
        .ok_or_else(|| LowerError::malformed(item, "keyword argument without a key"))?;
    let name = key
        .field_str("value")
        .or_else(|| key.field_str("unicode_value"))
        .ok_or_else(|| LowerError::malformed(key, "keyword argument name is not a string"))?;
    let value = required_expr(ctx, item, "value", ExprContext::Load)?;
    Ok(Keyword {
        arg: NameTok::new(name, NameTokContext::KeywordName, position_of(key)),
        value,
    })
}

/// `SizeofType` and `SizeofVar`: `sizeof()` with the operand dropped
pub(crate) fn lower_sizeof(object: &TaggedObject) -> Expr {
    let pos = position_of(object);
    let func = Expr::name("sizeof", ExprContext::Load, pos);
    Expr::new(ExprKind::Call(Call::positional(func, Vec::new())), pos)
}

/// Arithmetic and bitwise binary operators
pub(crate) fn lower_bin_op(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let left = required_expr(ctx, object, "operand1", ExprContext::Load)?;
    let right = required_expr(ctx, object, "operand2", ExprContext::Load)?;
    let kind = ExprKind::BinOp {
        left: Box::new(left),
        op: bin_op(operator(object)?),
        right: Box::new(right),
    };
    Ok(Expr::new(kind, position_of(object)))
}

/// `BoolBinop`
pub(crate) fn lower_bool_op(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let left = required_expr(ctx, object, "operand1", ExprContext::Load)?;
    let right = required_expr(ctx, object, "operand2", ExprContext::Load)?;
    let kind = ExprKind::BoolOp {
        op: bool_op(operator(object)?),
        values: vec![left, right],
    };
    Ok(Expr::new(kind, position_of(object)))
}

/// `PrimaryCmp`: the head of a comparison, flattened with its cascade
pub(crate) fn lower_compare(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let left = required_expr(ctx, object, "operand1", ExprContext::Load)?;
    let first = CascadeLink {
        op: cmp_op(operator(object)?),
        operand: required_expr(ctx, object, "operand2", ExprContext::Load)?,
        next: cascade(ctx, object)?,
    };
    let (ops, comparators) = first.unzip();
    let kind = ExprKind::Compare {
        left: Box::new(left),
        ops,
        comparators,
    };
    Ok(Expr::new(kind, position_of(object)))
}

/// `CascadedCmp`: one further `op operand` link of a comparison
pub(crate) fn lower_cascade(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<CascadeLink, LowerError> {
    Ok(CascadeLink {
        op: cmp_op(operator(object)?),
        operand: required_expr(ctx, object, "operand2", ExprContext::Load)?,
        next: cascade(ctx, object)?,
    })
}

fn cascade(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Option<Box<CascadeLink>>, LowerError> {
    let link = lower_field(ctx, object, "cascade", ExprContext::Load)?.into_cascade(object)?;
    Ok(link.map(Box::new))
}

/// `CondExpr`
pub(crate) fn lower_cond_expr(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let test = required_expr(ctx, object, "test", ExprContext::Load)?;
    let body = required_expr(ctx, object, "true_val", ExprContext::Load)?;
    let orelse = required_expr(ctx, object, "false_val", ExprContext::Load)?;
    let kind = ExprKind::IfExp {
        test: Box::new(test),
        body: Box::new(body),
        orelse: Box::new(orelse),
    };
    Ok(Expr::new(kind, position_of(object)))
}

/// `AwaitExpr`
pub(crate) fn lower_await(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let value = required_expr(ctx, object, "arg", ExprContext::Load)?;
    Ok(Expr::new(
        ExprKind::Await {
            value: Box::new(value),
        },
        position_of(object),
    ))
}

/// `YieldExpr`
pub(crate) fn lower_yield(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let value = optional_expr(ctx, object, "arg", ExprContext::Load)?.map(Box::new);
    Ok(Expr::new(ExprKind::Yield { value }, position_of(object)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConversionMode;
    use crate::dispatch::lower_object;
    use cy_syntax::{BinOpKind, BoolOpKind, CmpOpKind, Position};
    use expect_test::expect;

    fn lower(json: &str) -> Expr {
        let value = cy_json::read(json).unwrap();
        let object = value.as_object().unwrap();
        let mut ctx = LoweringContext::new(ConversionMode::Strict);
        lower_object(&mut ctx, object, ExprContext::Load)
            .unwrap()
            .into_expr(object)
            .unwrap()
            .unwrap()
    }

    fn name(id: &str, col: u32) -> String {
        format!(r#"{{"__node__": "Name", "line": 1, "col": {col}, "name": "{id}"}}"#)
    }

    #[test]
    fn test_cascade_is_flattened() {
        // a > b < c != d
        let json = format!(
            r#"{{"__node__": "PrimaryCmp", "line": 1, "col": 2, "operator": ">",
                "operand1": {a}, "operand2": {b},
                "cascade": {{"__node__": "CascadedCmp", "line": 1, "col": 6, "operator": "<",
                    "operand2": {c},
                    "cascade": {{"__node__": "CascadedCmp", "line": 1, "col": 10, "operator": "!=",
                        "operand2": {d}, "cascade": "None"}}}}}}"#,
            a = name("a", 0),
            b = name("b", 4),
            c = name("c", 8),
            d = name("d", 13),
        );
        let ExprKind::Compare {
            left,
            ops,
            comparators,
        } = lower(&json).kind
        else {
            panic!("expected a comparison");
        };
        assert_eq!(left.name_id(), Some("a"));
        assert_eq!(ops, [CmpOpKind::Gt, CmpOpKind::Lt, CmpOpKind::NotEq]);
        let ids: Vec<_> = comparators.iter().filter_map(Expr::name_id).collect();
        assert_eq!(ids, ["b", "c", "d"]);
    }

    #[test]
    fn test_simple_call() {
        let json = format!(
            r#"{{"__node__": "SimpleCall", "line": 1, "col": 3, "function": {f}, "args": [{x}]}}"#,
            f = name("f", 0),
            x = name("x", 2),
        );
        let ExprKind::Call(call) = lower(&json).kind else {
            panic!("expected a call");
        };
        assert_eq!(call.func.name_id(), Some("f"));
        assert_eq!(call.args.len(), 1);
        assert!(call.keywords.is_empty());
    }

    #[test]
    fn test_general_call_keywords_and_star_args() {
        let json = format!(
            r#"{{"__node__": "GeneralCall", "line": 1, "col": 1, "function": {f},
                "positional_args": {{"__node__": "AsTuple", "line": 1, "col": 3, "arg": {args}}},
                "keyword_args": {{"__node__": "Dict", "line": 1, "col": 10, "key_value_pairs": [
                    {{"__node__": "DictItem",
                      "key": {{"__node__": "IdentifierString", "line": 1, "col": 10, "value": "k"}},
                      "value": {v}}}]}}}}"#,
            f = name("f", 0),
            args = name("args", 3),
            v = name("v", 12),
        );
        let ExprKind::Call(call) = lower(&json).kind else {
            panic!("expected a call");
        };
        assert!(call.args.is_empty());
        assert_eq!(call.starargs.as_deref().and_then(Expr::name_id), Some("args"));
        assert_eq!(call.keywords.len(), 1);
        assert_eq!(call.keywords[0].arg.id, "k");
        assert_eq!(call.keywords[0].value.name_id(), Some("v"));
        assert!(call.kwargs.is_none());
    }

    #[test]
    fn test_general_call_double_star() {
        let json = format!(
            r#"{{"__node__": "GeneralCall", "line": 1, "col": 1, "function": {f},
                "positional_args": {{"__node__": "Tuple", "line": 1, "col": 2, "args": [{x}]}},
                "keyword_args": {kw}}}"#,
            f = name("f", 0),
            x = name("x", 2),
            kw = name("kw", 7),
        );
        let ExprKind::Call(call) = lower(&json).kind else {
            panic!("expected a call");
        };
        assert_eq!(call.args.len(), 1);
        assert_eq!(call.kwargs.as_deref().and_then(Expr::name_id), Some("kw"));
    }

    #[test]
    fn test_sizeof_is_empty_call() {
        let expr = lower(r#"{"__node__": "SizeofType", "line": 2, "col": 4}"#);
        assert_eq!(expr.to_string(), "Call[func=Name[id=sizeof, ctx=Load, reserved=false], args=[], keywords=[], starargs=null, kwargs=null]");
        assert_eq!(expr.pos, Position::new(2, 5));
    }

    #[test]
    fn test_bool_op() {
        let json = format!(
            r#"{{"__node__": "BoolBinop", "line": 1, "col": 2, "operator": "and",
                "operand1": {a}, "operand2": {b}}}"#,
            a = name("a", 0),
            b = name("b", 6),
        );
        let ExprKind::BoolOp { op, values } = lower(&json).kind else {
            panic!("expected a boolean operation");
        };
        assert_eq!(op, BoolOpKind::And);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_arithmetic_families_share_one_shape() {
        // a * b + 1
        let json = format!(
            r#"{{"__node__": "Add", "line": 1, "col": 6, "operator": "+",
                "operand1": {{"__node__": "Mul", "line": 1, "col": 2, "operator": "*",
                    "operand1": {a}, "operand2": {b}}},
                "operand2": {{"__node__": "Int", "line": 1, "col": 8, "value": "1"}}}}"#,
            a = name("a", 0),
            b = name("b", 4),
        );
        let expr = lower(&json);
        expect![[r#"BinOp[left=BinOp[left=Name[id=a, ctx=Load, reserved=false], op=Mult, right=Name[id=b, ctx=Load, reserved=false]], op=Add, right=Num[n=1, type=Int]]"#]]
            .assert_eq(&expr.to_string());
        assert_eq!(expr.pos, Position::new(1, 7));

        let json = format!(
            r#"{{"__node__": "IntBinop", "line": 1, "col": 2, "operator": "&",
                "operand1": {a}, "operand2": {b}}}"#,
            a = name("a", 0),
            b = name("b", 4),
        );
        let ExprKind::BinOp { op, .. } = lower(&json).kind else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinOpKind::BitAnd);
    }

    #[test]
    fn test_conditional_expression() {
        // a if c else b
        let json = format!(
            r#"{{"__node__": "CondExpr", "line": 1, "col": 2,
                "test": {c}, "true_val": {a}, "false_val": {b}}}"#,
            a = name("a", 0),
            c = name("c", 5),
            b = name("b", 12),
        );
        let expr = lower(&json);
        expect![[r#"IfExp[test=Name[id=c, ctx=Load, reserved=false], body=Name[id=a, ctx=Load, reserved=false], orelse=Name[id=b, ctx=Load, reserved=false]]"#]]
            .assert_eq(&expr.to_string());
        assert_eq!(expr.pos, Position::new(1, 3));
    }

    #[test]
    fn test_await_and_yield() {
        let json = format!(
            r#"{{"__node__": "AwaitExpr", "line": 1, "col": 0, "arg": {x}}}"#,
            x = name("x", 6),
        );
        assert_eq!(
            lower(&json).to_string(),
            "Await[value=Name[id=x, ctx=Load, reserved=false]]"
        );

        let json = format!(
            r#"{{"__node__": "YieldExpr", "line": 1, "col": 0, "arg": {x}}}"#,
            x = name("x", 6),
        );
        assert_eq!(
            lower(&json).to_string(),
            "Yield[value=Name[id=x, ctx=Load, reserved=false]]"
        );

        let bare = lower(r#"{"__node__": "YieldExpr", "line": 1, "col": 0, "arg": "None"}"#);
        assert_eq!(bare.to_string(), "Yield[value=null]");
    }

    #[test]
    fn test_await_requires_operand() {
        let value = cy_json::read(r#"{"__node__": "AwaitExpr", "line": 1, "col": 0}"#).unwrap();
        let mut ctx = LoweringContext::new(ConversionMode::Strict);
        assert!(lower_await(&mut ctx, value.as_object().unwrap()).is_err());
    }
}
