//! Names, literals and container displays

use crate::context::LoweringContext;
use crate::dispatch::{exprs_field, lower_field, lower_object, node_entries, required_expr};
use crate::error::LowerError;
use crate::position::position_of;
use cy_json::{TaggedObject, TaggedValue};
use cy_syntax::{Expr, ExprContext, ExprKind, Stmt, StrLit};

/// `Name`: an identifier in the caller's binding context
pub(crate) fn lower_name(object: &TaggedObject, expr_ctx: ExprContext) -> Result<Expr, LowerError> {
    let name = object
        .field_str("name")
        .ok_or_else(|| LowerError::malformed(object, "missing `name`"))?;
    Ok(Expr::name(name, expr_ctx, position_of(object)))
}

/// `Int`: the literal text, normalised to decimal when it fits
pub(crate) fn lower_int(object: &TaggedObject) -> Result<Expr, LowerError> {
    let text = match object.present("value") {
        Some(value) => value
            .as_str()
            .map(str::to_owned)
            .or_else(|| value.as_int().map(|int| int.to_string())),
        None => None,
    }
    .ok_or_else(|| LowerError::malformed(object, "missing integer `value`"))?;
    Ok(Expr::int(normalize_int(&text), position_of(object)))
}

/// Decimal spelling of an integer literal
///
/// Handles `0x`/`0o`/`0b` prefixes, legacy leading-zero octal, digit
/// separators and C suffixes (`10L`, `3u`). Text that does not parse is kept
/// as written.
fn normalize_int(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .trim_end_matches(['l', 'L', 'u', 'U'])
        .chars()
        .filter(|ch| *ch != '_')
        .collect();
    let lower = cleaned.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };
    match u128::from_str_radix(digits, radix) {
        Ok(value) => value.to_string(),
        Err(_) => text.to_owned(),
    }
}

/// `Bool`: reserved `True`/`False`
pub(crate) fn lower_bool(object: &TaggedObject) -> Result<Expr, LowerError> {
    let value = object
        .field_str("value")
        .or_else(|| {
            object.get("value").and_then(|value| match value {
                TaggedValue::Bool(true) => Some("True"),
                TaggedValue::Bool(false) => Some("False"),
                _ => None,
            })
        })
        .ok_or_else(|| LowerError::malformed(object, "missing boolean `value`"))?;
    Ok(Expr::reserved(value, position_of(object)))
}

/// `None`/`Null`: the reserved `None`
pub(crate) fn lower_none(object: &TaggedObject) -> Expr {
    Expr::none(position_of(object))
}

fn string_literal(object: &TaggedObject, field: &str, lit: StrLit) -> Expr {
    let s = object.field_str(field).unwrap_or_default().to_owned();
    Expr::new(ExprKind::Str(StrLit { s, ..lit }), position_of(object))
}

/// `String`: text from `unicode_value`
pub(crate) fn lower_string(object: &TaggedObject) -> Expr {
    string_literal(object, "unicode_value", StrLit::default())
}

/// `Unicode`
pub(crate) fn lower_unicode(object: &TaggedObject) -> Expr {
    let lit = StrLit {
        unicode: true,
        ..StrLit::default()
    };
    string_literal(object, "value", lit)
}

/// `Bytes`
pub(crate) fn lower_bytes(object: &TaggedObject) -> Expr {
    let lit = StrLit {
        binary: true,
        ..StrLit::default()
    };
    string_literal(object, "value", lit)
}

/// `JoinedStr`: one child per segment, the literal text itself stays empty
pub(crate) fn lower_joined_str(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Expr, LowerError> {
    let mut fstring_nodes: Vec<Stmt> = Vec::new();
    for segment in node_entries(ctx, object, "values")? {
        let lowered = if segment.is_tagged("FormattedValue") {
            lower_field(ctx, segment, "value", ExprContext::Load)?
        } else {
            lower_object(ctx, segment, ExprContext::Load)?
        };
        lowered.push_stmts(&mut fstring_nodes, object)?;
    }

    let lit = StrLit {
        unicode: true,
        fstring_nodes,
        ..StrLit::default()
    };
    Ok(Expr::new(ExprKind::Str(lit), position_of(object)))
}

/// `Tuple`: elements share the tuple's binding context
pub(crate) fn lower_tuple(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    expr_ctx: ExprContext,
) -> Result<Expr, LowerError> {
    let elts = exprs_field(ctx, object, "args", expr_ctx)?;
    let kind = ExprKind::Tuple {
        elts,
        ctx: expr_ctx,
        ends_with_comma: false,
    };
    Ok(Expr::new(kind, position_of(object)))
}

/// `List`: elements share the list's binding context
pub(crate) fn lower_list(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    expr_ctx: ExprContext,
) -> Result<Expr, LowerError> {
    let elts = exprs_field(ctx, object, "args", expr_ctx)?;
    Ok(Expr::new(ExprKind::List { elts, ctx: expr_ctx }, position_of(object)))
}

/// `Set`
pub(crate) fn lower_set(ctx: &mut LoweringContext, object: &TaggedObject) -> Result<Expr, LowerError> {
    let elts = exprs_field(ctx, object, "args", ExprContext::Load)?;
    Ok(Expr::new(ExprKind::Set { elts }, position_of(object)))
}

/// `Dict`: keys and values from `key_value_pairs`
pub(crate) fn lower_dict(ctx: &mut LoweringContext, object: &TaggedObject) -> Result<Expr, LowerError> {
    let mut keys = Vec::new();
    let mut values = Vec::new();
    for item in dict_items(object)? {
        keys.push(required_expr(ctx, item, "key", ExprContext::Load)?);
        values.push(required_expr(ctx, item, "value", ExprContext::Load)?);
    }
    Ok(Expr::new(ExprKind::Dict { keys, values }, position_of(object)))
}

/// The `{key, value}` items of a `Dict` node
pub(crate) fn dict_items(object: &TaggedObject) -> Result<Vec<&TaggedObject>, LowerError> {
    let Some(pairs) = object.present("key_value_pairs") else {
        return Ok(Vec::new());
    };
    let items = pairs
        .as_array()
        .ok_or_else(|| LowerError::malformed(object, "`key_value_pairs` is not an array"))?;
    items
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| LowerError::malformed(object, "dictionary item is not an object"))
        })
        .collect()
}
