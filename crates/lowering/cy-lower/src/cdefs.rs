//! C-level declarations
//!
//! None of these has a Python counterpart, so each is approximated by the
//! closest construct: struct and enum blocks become classes, variable and
//! type declarations become assignments, extern blocks are flattened into
//! their enclosing body.

use crate::context::LoweringContext;
use crate::defs::lower_decorators;
use crate::dispatch::{lower_object, node_entries, optional_expr, stmts_field};
use crate::error::LowerError;
use crate::lowered::{Lowered, Node};
use crate::params::lower_arguments;
use crate::position::{ENUM_NAME_OFFSET, STRUCT_NAME_OFFSET, name_position, position_of};
use cy_json::{TaggedObject, TaggedValue};
use cy_span::Position;
use cy_syntax::{
    ClassDef, Expr, ExprContext, FunctionDef, NameTok, NameTokContext, Stmt, StmtKind,
};

const POINTER_DECLARATOR: &str = "CPtrDeclarator";
const FUNC_DECLARATOR: &str = "CFuncDeclarator";

/// Skip any depth of pointer declarators
pub(crate) fn strip_pointers(mut declarator: &TaggedObject) -> &TaggedObject {
    while declarator.is_tagged(POINTER_DECLARATOR) {
        match declarator.field_object("base") {
            Some(base) => declarator = base,
            None => break,
        }
    }
    declarator
}

/// The `declarator` field of a declaration, pointers stripped
pub(crate) fn declarator(object: &TaggedObject) -> Option<&TaggedObject> {
    object.field_object("declarator").map(strip_pointers)
}

/// Name of a declaration's base type, from `base_type.name` or
/// `base_type.base_type_node.name`
pub(crate) fn base_type_name(object: &TaggedObject, expr_ctx: ExprContext) -> Option<Expr> {
    let base_type = object.field_object("base_type")?;
    let named = |node: &TaggedObject| {
        node.field_str("name")
            .filter(|name| !name.is_empty())
            .map(|name| Expr::name(name, expr_ctx, position_of(node)))
    };
    named(base_type).or_else(|| base_type.field_object("base_type_node").and_then(named))
}

fn assign(target: Expr, value: Expr, pos: Position) -> Stmt {
    Stmt::new(
        StmtKind::Assign {
            targets: vec![target],
            value,
        },
        pos,
    )
}

/// `CFuncDeclarator`: a body-less function named by its base declarator
pub(crate) fn lower_c_func_declarator(
    ctx: &mut LoweringContext,
    declarator: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let base = declarator
        .field_object("base")
        .map(strip_pointers)
        .ok_or_else(|| LowerError::malformed(declarator, "missing `base` declarator"))?;
    let name = base
        .field_str("name")
        .filter(|name| !name.is_empty())
        .ok_or_else(|| LowerError::malformed(declarator, "function declarator has no name"))?;
    let def = FunctionDef {
        name: NameTok::new(name, NameTokContext::FunctionName, position_of(base)),
        args: lower_arguments(ctx, declarator)?,
        body: Vec::new(),
        decorators: Vec::new(),
        is_async: false,
    };
    Ok(Stmt::new(StmtKind::FunctionDef(def), position_of(declarator)))
}

/// `CFuncDef`: a C function with a body
pub(crate) fn lower_c_func_def(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let declarator = declarator(object)
        .ok_or_else(|| LowerError::malformed(object, "missing `declarator`"))?;
    let mut stmt = lower_c_func_declarator(ctx, declarator)?;
    if let StmtKind::FunctionDef(def) = &mut stmt.kind {
        def.decorators = lower_decorators(ctx, object)?;
        def.body = stmts_field(ctx, object, "body")?;
    }
    Ok(stmt)
}

/// `CStructOrUnionDef`: a class holding the member declarations
pub(crate) fn lower_struct_or_union(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Stmt, LowerError> {
    let name = object
        .field_str("name")
        .ok_or_else(|| LowerError::malformed(object, "missing struct `name`"))?;
    let pos = position_of(object);
    let def = ClassDef {
        name: NameTok::new(
            name,
            NameTokContext::ClassName,
            name_position(pos, STRUCT_NAME_OFFSET),
        ),
        bases: Vec::new(),
        body: stmts_field(ctx, object, "attributes")?,
        decorators: Vec::new(),
    };
    Ok(Stmt::new(StmtKind::ClassDef(def), pos))
}

/// `CEnumDef`: a class of `member = 0` assignments
///
/// An anonymous enum has no class to hold its members, so the assignments
/// are spliced into the enclosing body.
pub(crate) fn lower_enum(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Lowered, LowerError> {
    let mut members = Vec::new();
    for item in node_entries(ctx, object, "items")? {
        let Some(name) = item.field_str("name") else {
            ctx.anomaly(LowerError::malformed(item, "enum member has no name"))?;
            continue;
        };
        let pos = position_of(item);
        members.push(assign(
            Expr::name(name, ExprContext::Store, pos),
            Expr::int("0", pos),
            pos,
        ));
    }

    let Some(name) = object.present("name").and_then(TaggedValue::as_str) else {
        return Ok(Lowered::Sequence(members.into_iter().map(Node::Stmt).collect()));
    };
    let pos = position_of(object);
    let def = ClassDef {
        name: NameTok::new(
            name,
            NameTokContext::ClassName,
            name_position(pos, ENUM_NAME_OFFSET),
        ),
        bases: Vec::new(),
        body: members,
        decorators: lower_decorators(ctx, object)?,
    };
    Ok(Stmt::new(StmtKind::ClassDef(def), pos).into())
}

/// `CTypeDef`: `alias = base_type`, or `alias = None` without a base type name
pub(crate) fn lower_typedef(object: &TaggedObject) -> Result<Stmt, LowerError> {
    let declarator =
        declarator(object).ok_or_else(|| LowerError::malformed(object, "missing `declarator`"))?;
    let name = declarator
        .field_str("name")
        .ok_or_else(|| LowerError::malformed(object, "typedef declarator has no name"))?;
    let target = Expr::name(name, ExprContext::Store, position_of(declarator));
    let value = base_type_name(object, ExprContext::Load)
        .unwrap_or_else(|| Expr::none(Position::UNKNOWN));
    Ok(assign(target, value, position_of(object)))
}

/// `CVarDef`: one assignment per declarator, or a function for a function
/// declarator
pub(crate) fn lower_var_def(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Lowered, LowerError> {
    let mut nodes = Vec::new();
    for declarator in node_entries(ctx, object, "declarators")? {
        let declarator = strip_pointers(declarator);
        if declarator.is_tagged(FUNC_DECLARATOR) {
            let lowered = lower_object(ctx, declarator, ExprContext::Load)?;
            nodes.extend(lowered.into_nodes(object)?);
            continue;
        }

        let Some(name) = declarator.field_str("name") else {
            ctx.anomaly(LowerError::malformed(declarator, "variable declarator has no name"))?;
            continue;
        };
        let pos = position_of(declarator);
        let value = optional_expr(ctx, declarator, "default", ExprContext::Load)?
            .unwrap_or_else(|| Expr::none(pos));
        nodes.push(Node::Stmt(assign(
            Expr::name(name, ExprContext::Store, pos),
            value,
            pos,
        )));
    }
    Ok(Lowered::Sequence(nodes))
}

/// `CDefExtern`: the block's declarations, spliced into the enclosing body
pub(crate) fn lower_extern(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
) -> Result<Lowered, LowerError> {
    let body = stmts_field(ctx, object, "body")?;
    Ok(Lowered::Sequence(body.into_iter().map(Node::Stmt).collect()))
}
