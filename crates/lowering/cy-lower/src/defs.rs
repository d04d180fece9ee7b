//! Python function and class definitions

use crate::context::LoweringContext;
use crate::dispatch::{exprs_field, node_entries, optional_expr, stmts_field};
use crate::error::LowerError;
use crate::params::lower_arguments;
use crate::position::{
    CDEF_CLASS_NAME_OFFSET, DEF_NAME_OFFSET, PY_CLASS_NAME_OFFSET, name_position, position_of,
};
use cy_json::TaggedObject;
use cy_syntax::{
    ClassDef, Decorator, Expr, ExprContext, ExprKind, FunctionDef, NameTok, NameTokContext, Stmt,
    StmtKind,
};
use std::mem;

/// `Def`
pub(crate) fn lower_def(ctx: &mut LoweringContext, object: &TaggedObject) -> Result<Stmt, LowerError> {
    let name = object
        .field_str("name")
        .ok_or_else(|| LowerError::malformed(object, "missing function `name`"))?;
    let pos = position_of(object);
    let def = FunctionDef {
        name: NameTok::new(
            name,
            NameTokContext::FunctionName,
            name_position(pos, DEF_NAME_OFFSET),
        ),
        args: lower_arguments(ctx, object)?,
        decorators: lower_decorators(ctx, object)?,
        body: stmts_field(ctx, object, "body")?,
        is_async: object.field_flag("is_async_def"),
    };
    Ok(Stmt::new(StmtKind::FunctionDef(def), pos))
}

/// `PyClassDef`
pub(crate) fn lower_py_class(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    lower_class(ctx, object, "name", PY_CLASS_NAME_OFFSET)
}

/// `CClassDef`, an extension type
pub(crate) fn lower_cdef_class(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    lower_class(ctx, object, "class_name", CDEF_CLASS_NAME_OFFSET)
}

fn lower_class(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    name_field: &str,
    name_offset: u32,
) -> Result<Stmt, LowerError> {
    let name = object
        .field_str(name_field)
        .ok_or_else(|| LowerError::malformed(object, format!("missing class `{name_field}`")))?;
    let pos = position_of(object);
    let def = ClassDef {
        name: NameTok::new(name, NameTokContext::ClassName, name_position(pos, name_offset)),
        bases: lower_bases(ctx, object)?,
        body: stmts_field(ctx, object, "body")?,
        decorators: lower_decorators(ctx, object)?,
    };
    Ok(Stmt::new(StmtKind::ClassDef(def), pos))
}

/// Base classes; a lone tuple stands for its elements
fn lower_bases(ctx: &mut LoweringContext, object: &TaggedObject) -> Result<Vec<Expr>, LowerError> {
    let mut bases = exprs_field(ctx, object, "bases", ExprContext::Load)?;
    if let [
        Expr {
            kind: ExprKind::Tuple { elts, .. },
            ..
        },
    ] = bases.as_mut_slice()
    {
        return Ok(mem::take(elts));
    }
    Ok(bases)
}

/// The `decorators` list of a definition
///
/// `@name` becomes a plain decorator and `@name(...)` a call-style one.
/// Anything else is an anomaly.
pub(crate) fn lower_decorators(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Vec<Decorator>, LowerError> {
    let mut decorators = Vec::new();
    for entry in node_entries(ctx, object, "decorators")? {
        let Some(expr) = optional_expr(ctx, entry, "decorator", ExprContext::Load)? else {
            continue;
        };
        let pos = expr.pos;
        let decorator = if matches!(expr.kind, ExprKind::Name { .. }) {
            Decorator {
                func: expr,
                args: Vec::new(),
                keywords: Vec::new(),
                starargs: None,
                kwargs: None,
                is_call: false,
                pos,
            }
        } else if let ExprKind::Call(call) = expr.kind {
            Decorator {
                func: *call.func,
                args: call.args,
                keywords: call.keywords,
                starargs: call.starargs.map(|starargs| *starargs),
                kwargs: call.kwargs.map(|kwargs| *kwargs),
                is_call: true,
                pos,
            }
        } else {
            ctx.anomaly(LowerError::malformed(
                entry,
                "decorator is neither a name nor a call",
            ))?;
            continue;
        };
        decorators.push(decorator);
    }
    Ok(decorators)
}
