//! Tag dispatch
//!
//! Every foreign value goes through [`lower_value`]. Objects are routed on
//! their discriminator to one constructor; unknown discriminators and
//! constructor failures are handed to the context's anomaly policy here, so
//! a bad sub-tree never aborts its siblings in permissive mode.

use crate::context::LoweringContext;
use crate::error::LowerError;
use crate::lowered::{Lowered, Node};
use crate::{cdefs, defs, exprs, literals, stmts};
use cy_json::{TaggedObject, TaggedValue};
use cy_span::Position;
use cy_syntax::{Expr, ExprContext, Stmt};
use stacker::maybe_grow;

/// Remaining stack below which a nested value is lowered on a fresh segment
const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each fresh stack segment
const STACK_GROWTH: usize = 1024 * 1024;

/// Foreign node kinds with a constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Int,
    Name,
    Bool,
    /// `None` and `Null`
    NoneLiteral,
    String,
    Unicode,
    Bytes,
    JoinedStr,
    Tuple,
    List,
    Set,
    Dict,
    PassStat,
    ExprStat,
    SingleAssignment,
    InPlaceAssignment,
    IfStat,
    WhileStat,
    ForInStat,
    AsyncForStat,
    AssertStat,
    ReturnStat,
    StatList,
    Def,
    CFuncDef,
    CFuncDeclarator,
    PyClassDef,
    CClassDef,
    CStructOrUnionDef,
    CEnumDef,
    CTypeDef,
    CVarDef,
    CDefExtern,
    SimpleCall,
    GeneralCall,
    /// `SizeofType` and `SizeofVar`
    Sizeof,
    /// `Add`, `Sub`, `Mul`, `Div`, `MatMult` and `IntBinop`
    Arithmetic,
    BoolBinop,
    PrimaryCmp,
    CascadedCmp,
    CondExpr,
    AwaitExpr,
    YieldExpr,
}

impl NodeTag {
    /// Look up the constructor for a discriminator
    pub fn from_tag(tag: &str) -> Option<Self> {
        let node_tag = match tag {
            "Int" => Self::Int,
            "Name" => Self::Name,
            "Bool" => Self::Bool,
            "None" | "Null" => Self::NoneLiteral,
            "String" => Self::String,
            "Unicode" => Self::Unicode,
            "Bytes" => Self::Bytes,
            "JoinedStr" => Self::JoinedStr,
            "Tuple" => Self::Tuple,
            "List" => Self::List,
            "Set" => Self::Set,
            "Dict" => Self::Dict,
            "PassStat" => Self::PassStat,
            "ExprStat" => Self::ExprStat,
            "SingleAssignment" => Self::SingleAssignment,
            "InPlaceAssignment" => Self::InPlaceAssignment,
            "IfStat" => Self::IfStat,
            "WhileStat" => Self::WhileStat,
            "ForInStat" => Self::ForInStat,
            "AsyncForStat" => Self::AsyncForStat,
            "AssertStat" => Self::AssertStat,
            "ReturnStat" => Self::ReturnStat,
            "StatList" => Self::StatList,
            "Def" => Self::Def,
            "CFuncDef" => Self::CFuncDef,
            "CFuncDeclarator" => Self::CFuncDeclarator,
            "PyClassDef" => Self::PyClassDef,
            "CClassDef" => Self::CClassDef,
            "CStructOrUnionDef" => Self::CStructOrUnionDef,
            "CEnumDef" => Self::CEnumDef,
            "CTypeDef" => Self::CTypeDef,
            "CVarDef" => Self::CVarDef,
            "CDefExtern" => Self::CDefExtern,
            "SimpleCall" => Self::SimpleCall,
            "GeneralCall" => Self::GeneralCall,
            "SizeofType" | "SizeofVar" => Self::Sizeof,
            "Add" | "Sub" | "Mul" | "Div" | "MatMult" | "IntBinop" => Self::Arithmetic,
            "BoolBinop" => Self::BoolBinop,
            "PrimaryCmp" => Self::PrimaryCmp,
            "CascadedCmp" => Self::CascadedCmp,
            "CondExpr" => Self::CondExpr,
            "AwaitExpr" => Self::AwaitExpr,
            "YieldExpr" => Self::YieldExpr,
            _ => return None,
        };
        Some(node_tag)
    }
}

/// Lower any foreign value
///
/// `expr_ctx` is the binding context for names met directly in this value
/// (and inside tuple/list targets).
pub(crate) fn lower_value(
    ctx: &mut LoweringContext,
    value: &TaggedValue,
    expr_ctx: ExprContext,
) -> Result<Lowered, LowerError> {
    if value.is_absent() {
        return Ok(Lowered::Absent);
    }
    maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || match value {
        TaggedValue::Object(object) => lower_object(ctx, object, expr_ctx),
        TaggedValue::Array(items) => lower_array(ctx, items, expr_ctx),
        other => ctx.recover(LowerError::MalformedNodeShape {
            tag: other.kind_name().to_owned(),
            reason: format!("expected a node, found {}", other.kind_name()),
            position: Position::UNKNOWN,
        }),
    })
}

/// Lower one tagged object through its constructor
pub(crate) fn lower_object(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    expr_ctx: ExprContext,
) -> Result<Lowered, LowerError> {
    let Some(tag) = object.tag() else {
        return ctx.recover(LowerError::malformed(object, "object has no discriminator"));
    };
    let Some(node_tag) = NodeTag::from_tag(tag) else {
        return ctx.recover(LowerError::unknown(tag, object));
    };
    match construct(ctx, node_tag, object, expr_ctx) {
        Ok(lowered) => Ok(lowered),
        Err(err) => ctx.recover(err),
    }
}

fn lower_array(
    ctx: &mut LoweringContext,
    items: &[TaggedValue],
    expr_ctx: ExprContext,
) -> Result<Lowered, LowerError> {
    let mut nodes: Vec<Node> = Vec::with_capacity(items.len());
    for item in items {
        match lower_value(ctx, item, expr_ctx)? {
            Lowered::Absent => {}
            Lowered::Node(node) => nodes.push(node),
            Lowered::Sequence(group) => nodes.extend(group),
            Lowered::Cascade(_) => {
                ctx.anomaly(LowerError::MalformedNodeShape {
                    tag: "CascadedCmp".to_owned(),
                    reason: "comparison chain link inside a node list".to_owned(),
                    position: Position::UNKNOWN,
                })?;
            }
        }
    }
    Ok(Lowered::Sequence(nodes))
}

fn construct(
    ctx: &mut LoweringContext,
    tag: NodeTag,
    object: &TaggedObject,
    expr_ctx: ExprContext,
) -> Result<Lowered, LowerError> {
    let lowered = match tag {
        NodeTag::Int => literals::lower_int(object)?.into(),
        NodeTag::Name => literals::lower_name(object, expr_ctx)?.into(),
        NodeTag::Bool => literals::lower_bool(object)?.into(),
        NodeTag::NoneLiteral => literals::lower_none(object).into(),
        NodeTag::String => literals::lower_string(object).into(),
        NodeTag::Unicode => literals::lower_unicode(object).into(),
        NodeTag::Bytes => literals::lower_bytes(object).into(),
        NodeTag::JoinedStr => literals::lower_joined_str(ctx, object)?.into(),
        NodeTag::Tuple => literals::lower_tuple(ctx, object, expr_ctx)?.into(),
        NodeTag::List => literals::lower_list(ctx, object, expr_ctx)?.into(),
        NodeTag::Set => literals::lower_set(ctx, object)?.into(),
        NodeTag::Dict => literals::lower_dict(ctx, object)?.into(),
        NodeTag::PassStat => stmts::lower_pass(object).into(),
        NodeTag::ExprStat => stmts::lower_expr_stat(ctx, object)?.into(),
        NodeTag::SingleAssignment => stmts::lower_assignment(ctx, object)?.into(),
        NodeTag::InPlaceAssignment => stmts::lower_aug_assignment(ctx, object)?.into(),
        NodeTag::IfStat => stmts::lower_if(ctx, object)?.into(),
        NodeTag::WhileStat => stmts::lower_while(ctx, object)?.into(),
        NodeTag::ForInStat => stmts::lower_for(ctx, object, false)?.into(),
        NodeTag::AsyncForStat => stmts::lower_for(ctx, object, true)?.into(),
        NodeTag::AssertStat => stmts::lower_assert(ctx, object)?.into(),
        NodeTag::ReturnStat => stmts::lower_return(ctx, object)?.into(),
        NodeTag::StatList => stmts::lower_stat_list(ctx, object)?,
        NodeTag::Def => defs::lower_def(ctx, object)?.into(),
        NodeTag::PyClassDef => defs::lower_py_class(ctx, object)?.into(),
        NodeTag::CClassDef => defs::lower_cdef_class(ctx, object)?.into(),
        NodeTag::CFuncDef => cdefs::lower_c_func_def(ctx, object)?.into(),
        NodeTag::CFuncDeclarator => cdefs::lower_c_func_declarator(ctx, object)?.into(),
        NodeTag::CStructOrUnionDef => cdefs::lower_struct_or_union(ctx, object)?.into(),
        NodeTag::CEnumDef => cdefs::lower_enum(ctx, object)?.into(),
        NodeTag::CTypeDef => cdefs::lower_typedef(object)?.into(),
        NodeTag::CVarDef => cdefs::lower_var_def(ctx, object)?,
        NodeTag::CDefExtern => cdefs::lower_extern(ctx, object)?,
        NodeTag::SimpleCall => exprs::lower_simple_call(ctx, object)?.into(),
        NodeTag::GeneralCall => exprs::lower_general_call(ctx, object)?.into(),
        NodeTag::Sizeof => exprs::lower_sizeof(object).into(),
        NodeTag::Arithmetic => exprs::lower_bin_op(ctx, object)?.into(),
        NodeTag::BoolBinop => exprs::lower_bool_op(ctx, object)?.into(),
        NodeTag::PrimaryCmp => exprs::lower_compare(ctx, object)?.into(),
        NodeTag::CascadedCmp => Lowered::Cascade(exprs::lower_cascade(ctx, object)?),
        NodeTag::CondExpr => exprs::lower_cond_expr(ctx, object)?.into(),
        NodeTag::AwaitExpr => exprs::lower_await(ctx, object)?.into(),
        NodeTag::YieldExpr => exprs::lower_yield(ctx, object)?.into(),
    };
    Ok(lowered)
}

/// Lower a field, treating a missing field as absence
pub(crate) fn lower_field(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    field: &str,
    expr_ctx: ExprContext,
) -> Result<Lowered, LowerError> {
    match object.get(field) {
        Some(value) => lower_value(ctx, value, expr_ctx),
        None => Ok(Lowered::Absent),
    }
}

/// An optional expression field
pub(crate) fn optional_expr(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    field: &str,
    expr_ctx: ExprContext,
) -> Result<Option<Expr>, LowerError> {
    lower_field(ctx, object, field, expr_ctx)?.into_expr(object)
}

/// An expression field the node cannot do without
pub(crate) fn required_expr(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    field: &str,
    expr_ctx: ExprContext,
) -> Result<Expr, LowerError> {
    optional_expr(ctx, object, field, expr_ctx)?
        .ok_or_else(|| LowerError::malformed(object, format!("`{field}` has no expression")))
}

/// A statement-list field, with groups spliced in
pub(crate) fn stmts_field(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    field: &str,
) -> Result<Vec<Stmt>, LowerError> {
    let mut out = Vec::new();
    lower_field(ctx, object, field, ExprContext::Load)?.push_stmts(&mut out, object)?;
    Ok(out)
}

/// An expression-list field, with groups spliced in
pub(crate) fn exprs_field(
    ctx: &mut LoweringContext,
    object: &TaggedObject,
    field: &str,
    expr_ctx: ExprContext,
) -> Result<Vec<Expr>, LowerError> {
    let mut out = Vec::new();
    lower_field(ctx, object, field, expr_ctx)?.push_exprs(&mut out, object)?;
    Ok(out)
}

/// The node entries of the array in `field`
///
/// Absent entries are skipped; any other non-object entry is an anomaly.
pub(crate) fn node_entries<'doc>(
    ctx: &mut LoweringContext,
    object: &'doc TaggedObject,
    field: &str,
) -> Result<Vec<&'doc TaggedObject>, LowerError> {
    let mut nodes = Vec::new();
    let Some(entries) = object.present(field) else {
        return Ok(nodes);
    };
    let entries = entries
        .as_array()
        .ok_or_else(|| LowerError::malformed(object, format!("`{field}` is not an array")))?;
    for entry in entries {
        match entry {
            TaggedValue::Object(node) => nodes.push(node),
            other if other.is_absent() => {}
            other => ctx.anomaly(LowerError::malformed(
                object,
                format!("`{field}` entry is a {}, not a node", other.kind_name()),
            ))?,
        }
    }
    Ok(nodes)
}
