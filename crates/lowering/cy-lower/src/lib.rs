//! Lowering of the Cython front end's JSON tree into the canonical AST
//!
//! This crate handles:
//! - Tag dispatch over the foreign node vocabulary
//! - Per-tag node construction, including C declarations with no Python
//!   equivalent
//! - Position correction
//! - Recovery from unknown or malformed sub-trees, or escalation in strict mode

mod cdefs;
mod context;
mod defs;
mod dispatch;
pub mod error;
mod exprs;
mod literals;
mod lowered;
mod operators;
mod params;
mod position;
mod stmts;

pub use context::{ConversionMode, LoweringContext};
pub use dispatch::NodeTag;
pub use error::LowerError;
pub use operators::{bin_op, bool_op, cmp_op};
pub use position::position_of;

use cy_json::TaggedObject;
use cy_syntax::{ExprContext, Module};

/// Tag of the root node of every well-formed document
pub const STAT_LIST: &str = "StatList";

/// Lower a `StatList` root into a module
///
/// Each top-level statement is lowered on its own: in permissive mode a
/// statement that fails to convert is dropped and recorded in the context's
/// diagnostics while its siblings still convert.
///
/// # Errors
///
/// Returns [`LowerError::UnexpectedRoot`] when `root` is not a statement list,
/// and in strict mode the first anomaly met anywhere in the tree.
pub fn lower_module(ctx: &mut LoweringContext, root: &TaggedObject) -> Result<Module, LowerError> {
    if !root.is_tagged(STAT_LIST) {
        return Err(LowerError::UnexpectedRoot {
            found: root.tag().unwrap_or("untagged object").to_owned(),
        });
    }

    let mut body = Vec::new();
    if let Some(stats) = root.present("stats") {
        let Some(stats) = stats.as_array() else {
            return Err(LowerError::malformed(root, "`stats` is not an array"));
        };
        for stat in stats {
            let lowered = dispatch::lower_value(ctx, stat, ExprContext::Load)?;
            if let Err(err) = lowered.push_stmts(&mut body, root) {
                ctx.anomaly(err)?;
            }
        }
    }
    Ok(Module::new(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cy_span::Position;

    const WITH_UNKNOWN: &str = r#"{"__node__": "StatList", "line": 1, "col": 0, "stats": [
        {"__node__": "SingleAssignment", "line": 1, "col": 4,
         "lhs": {"__node__": "Name", "line": 1, "col": 0, "name": "a"},
         "rhs": {"__node__": "Lambda", "line": 1, "col": 4}},
        {"__node__": "PassStat", "line": 2, "col": 0}
    ]}"#;

    fn root(json: &str) -> TaggedObject {
        cy_json::read(json).unwrap().as_object().unwrap().clone()
    }

    #[test]
    fn test_permissive_drops_offending_branch() {
        let mut ctx = LoweringContext::new(ConversionMode::Permissive);
        let module = lower_module(&mut ctx, &root(WITH_UNKNOWN)).unwrap();

        assert_eq!(module.to_string(), "Module[body=[Pass]]");
        let tags: Vec<_> = ctx.diagnostics().iter().map(LowerError::tag).collect();
        assert_eq!(tags, ["Lambda", "SingleAssignment"]);
        assert!(matches!(
            ctx.diagnostics()[0],
            LowerError::UnknownNodeTag { .. }
        ));
    }

    #[test]
    fn test_strict_raises_on_unknown_tag() {
        let mut ctx = LoweringContext::new(ConversionMode::Strict);
        let err = lower_module(&mut ctx, &root(WITH_UNKNOWN)).unwrap_err();
        let LowerError::UnknownNodeTag { tag, subtree, .. } = err else {
            panic!("expected an unknown tag error");
        };
        assert_eq!(tag, "Lambda");
        assert!(subtree.contains("\"__node__\": \"Lambda\""));
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_root_must_be_stat_list() {
        let mut ctx = LoweringContext::new(ConversionMode::Permissive);
        let err = lower_module(&mut ctx, &root(r#"{"__node__": "PassStat"}"#)).unwrap_err();
        assert_eq!(
            err,
            LowerError::UnexpectedRoot {
                found: "PassStat".to_owned()
            }
        );
    }

    #[test]
    fn test_nested_statement_groups_are_flattened() {
        let mut ctx = LoweringContext::new(ConversionMode::Strict);
        let module = lower_module(
            &mut ctx,
            &root(
                r#"{"__node__": "StatList", "stats": [
                    {"__node__": "StatList", "stats": [
                        {"__node__": "PassStat", "line": 1, "col": 0},
                        {"__node__": "StatList", "stats": [{"__node__": "PassStat", "line": 2, "col": 0}]}
                    ]},
                    {"__node__": "PassStat", "line": 3, "col": 0}
                ]}"#,
            ),
        )
        .unwrap();
        assert_eq!(module.body.len(), 3);
        assert_eq!(module.body[2].pos, Position::new(3, 1));
    }
}
