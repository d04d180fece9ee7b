//! C-level declarations

use conversion_tests::convert_strict;
use cy_syntax::Position;
use expect_test::expect;

#[test]
fn test_cdef_class_name_position() {
    let module = convert_strict("cdef class bar: pass", include_str!("fixtures/cdef_class.json"));

    let class = module.body[0].as_class_def().expect("class definition");
    assert_eq!(module.body[0].pos, Position::new(1, 6));
    assert_eq!(class.name.id, "bar");
    assert_eq!(class.name.pos, Position::new(1, 12));
    assert!(class.bases.is_empty());
    assert!(class.decorators.is_empty());
}

#[test]
fn test_extern_block_is_flattened() {
    let source = "\
cdef extern from \"point.h\":
    struct point:
        int x
        int y
    enum: LIMIT
    ctypedef long index_t
    int area(point p)
";
    let module = convert_strict(source, include_str!("fixtures/extern.json"));

    let rendered = module
        .body
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    expect![[r#"
        ClassDef[name=NameTok[id=point, ctx=ClassName], bases=[], body=[Assign[targets=[Name[id=x, ctx=Store, reserved=false]], value=Name[id=None, ctx=Load, reserved=true]], Assign[targets=[Name[id=y, ctx=Store, reserved=false]], value=Name[id=None, ctx=Load, reserved=true]]], decs=[]]
        Assign[targets=[Name[id=LIMIT, ctx=Store, reserved=false]], value=Num[n=0, type=Int]]
        Assign[targets=[Name[id=index_t, ctx=Store, reserved=false]], value=Name[id=long, ctx=Load, reserved=false]]
        FunctionDef[name=NameTok[id=area, ctx=FunctionName], args=arguments[args=[Name[id=p, ctx=Param, reserved=false]], vararg=null, kwarg=null, defaults=[null], kwonlyargs=[], kw_defaults=[], annotation=[null], kwonlyargannotation=[]], body=[], decs=[], async=false]"#]]
    .assert_eq(&rendered);

    let point = module.body[0].as_class_def().expect("struct class");
    assert_eq!(point.name.pos, Position::new(2, 11));
    let area = module.body[3].as_function_def().expect("function");
    assert_eq!(area.name.pos, Position::new(7, 9));
    assert_eq!(module.body[3].pos, Position::new(7, 13));
}
