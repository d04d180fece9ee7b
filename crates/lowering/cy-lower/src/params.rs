//! Parameter lists

use crate::cdefs::{base_type_name, declarator};
use crate::context::LoweringContext;
use crate::dispatch::optional_expr;
use crate::error::LowerError;
use crate::position::position_of;
use cy_json::TaggedObject;
use cy_syntax::{Arguments, Expr, ExprContext, NameTok, NameTokContext};

/// Parameters of a `Def` or C function declarator
///
/// A parameter whose declarator carries no name (`int[]`) is named after its
/// base type. One with neither is an anomaly and is skipped.
pub(crate) fn lower_arguments(
    ctx: &mut LoweringContext,
    function: &TaggedObject,
) -> Result<Arguments, LowerError> {
    let mut arguments = Arguments::default();

    if let Some(params) = function.present("args") {
        let params = params
            .as_array()
            .ok_or_else(|| LowerError::malformed(function, "`args` is not an array"))?;
        for param in params {
            let param = param
                .as_object()
                .ok_or_else(|| LowerError::malformed(function, "parameter is not an object"))?;
            let kw_only = param.field_int("kw_only") == Some(1);
            let expr_ctx = if kw_only {
                ExprContext::KwOnlyParam
            } else {
                ExprContext::Param
            };
            let Some(name) = parameter_name(param, expr_ctx) else {
                ctx.anomaly(LowerError::malformed(param, "unable to name parameter"))?;
                continue;
            };
            let default = optional_expr(ctx, param, "default", ExprContext::Load)?;
            let annotation = optional_expr(ctx, param, "annotation", ExprContext::Load)?;

            if kw_only {
                arguments.kwonlyargs.push(name);
                arguments.kw_defaults.push(default);
                arguments.kwonly_annotations.push(annotation);
            } else {
                arguments.args.push(name);
                arguments.defaults.push(default);
                arguments.annotations.push(annotation);
            }
        }
    }

    arguments.vararg = collector(function, "star_arg", NameTokContext::VarArg);
    arguments.kwarg = collector(function, "starstar_arg", NameTokContext::KwArg);
    Ok(arguments)
}

fn parameter_name(param: &TaggedObject, expr_ctx: ExprContext) -> Option<Expr> {
    let declared = declarator(param).and_then(|declarator| {
        declarator
            .field_str("name")
            .filter(|name| !name.is_empty())
            .map(|name| Expr::name(name, expr_ctx, position_of(declarator)))
    });
    declared.or_else(|| base_type_name(param, expr_ctx))
}

fn collector(function: &TaggedObject, field: &str, ctx: NameTokContext) -> Option<NameTok> {
    let object = function.field_object(field)?;
    let name = object.field_str("name")?;
    Some(NameTok::new(name, ctx, position_of(object)))
}
