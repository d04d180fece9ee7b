//! End-to-end conversion of recorded Cython documents

use conversion_tests::{convert_recorded, convert_strict};
use cy_driver::{ConversionError, ConversionMode};
use cy_lower::LowerError;
use cy_syntax::{CmpOpKind, ExprKind, Position, StmtKind};
use expect_test::expect;

#[test]
fn test_simple_assignment() {
    let module = convert_strict("a = 10", include_str!("fixtures/assign.json"));

    expect![[r#"Module[body=[Assign[targets=[Name[id=a, ctx=Store, reserved=false]], value=Num[n=10, type=Int]]]]"#]]
        .assert_eq(&module.to_string());

    let StmtKind::Assign { targets, value } = &module.body[0].kind else {
        panic!("expected an assignment");
    };
    assert_eq!(module.body[0].pos, Position::new(1, 5));
    assert_eq!(targets[0].pos, Position::new(1, 1));
    assert_eq!(value.pos, Position::new(1, 5));
}

#[test]
fn test_cascaded_comparison_is_flattened() {
    let module = convert_strict("a > b < c", include_str!("fixtures/cascade.json"));

    expect![[r#"Module[body=[Expr[value=Compare[left=Name[id=a, ctx=Load, reserved=false], ops=[Gt, Lt], comparators=[Name[id=b, ctx=Load, reserved=false], Name[id=c, ctx=Load, reserved=false]]]]]]"#]]
        .assert_eq(&module.to_string());

    let StmtKind::Expr(expr) = &module.body[0].kind else {
        panic!("expected an expression statement");
    };
    // The expression statement's position wins over the comparison's
    assert_eq!(expr.pos, Position::new(1, 1));
    let ExprKind::Compare { ops, .. } = &expr.kind else {
        panic!("expected a comparison");
    };
    assert_eq!(ops, &[CmpOpKind::Gt, CmpOpKind::Lt]);
}

#[test]
fn test_compile_error_is_reported() {
    let result = convert_recorded(
        "a b c",
        include_str!("fixtures/compile_error.json"),
        ConversionMode::Permissive,
    );

    assert!(result.ast.is_none());
    let Some(ConversionError::Compile(diagnostic)) = &result.error else {
        panic!("expected a compile error, got {:?}", result.error);
    };
    assert_eq!(diagnostic.message, "Syntax error in simple statement list");
    assert_eq!(diagnostic.position(), Position::new(1, 3));
}

#[test]
fn test_decorated_function() {
    let module = convert_strict("@dec(x)\ndef f(): pass", include_str!("fixtures/decorated.json"));

    let stmt = &module.body[0];
    let def = stmt.as_function_def().expect("function definition");
    assert_eq!(stmt.pos, Position::new(2, 1));
    assert_eq!(def.name.id, "f");
    assert_eq!(def.name.pos, Position::new(2, 5));
    assert_eq!(def.body.len(), 1);

    let [decorator] = def.decorators.as_slice() else {
        panic!("expected one decorator");
    };
    assert!(decorator.is_call);
    assert_eq!(decorator.func.name_id(), Some("dec"));
    assert_eq!(decorator.func.pos, Position::new(1, 2));
    let args: Vec<_> = decorator.args.iter().filter_map(|arg| arg.name_id()).collect();
    assert_eq!(args, ["x"]);
}

#[test]
fn test_permissive_mode_drops_unsupported_nodes() {
    let result = convert_recorded(
        "lambda: 1\npass",
        include_str!("fixtures/unsupported.json"),
        ConversionMode::Permissive,
    );

    assert!(result.error.is_none());
    let module = result.ast.expect("module");
    assert_eq!(module.to_string(), "Module[body=[Pass]]");
    let tags: Vec<_> = result.diagnostics.iter().map(LowerError::tag).collect();
    assert_eq!(tags, ["Lambda", "ExprStat"]);
}

#[test]
fn test_strict_mode_rejects_unsupported_nodes() {
    let result = convert_recorded(
        "lambda: 1\npass",
        include_str!("fixtures/unsupported.json"),
        ConversionMode::Strict,
    );

    assert!(result.ast.is_none());
    match result.error {
        Some(ConversionError::Lowering(LowerError::UnknownNodeTag { tag, position, subtree })) => {
            assert_eq!(tag, "Lambda");
            assert_eq!(position, Position::new(1, 1));
            assert!(subtree.contains("result_expr"));
        }
        other => panic!("expected an unknown tag error, got {other:?}"),
    }
}
