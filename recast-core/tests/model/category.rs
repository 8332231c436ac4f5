use recast_core::{Field, Kind, ScalarType, Shape, ShapeCategory, Value, builtins, classify};

static POINT: Shape = Shape::structure(
    "Point",
    &[Field::new("X", &builtins::I32), Field::new("Y", &builtins::I32)],
);
static POINTS: Shape = Shape::list(&POINT);
static BY_NAME: Shape = Shape::map(&builtins::STRING, &POINT);
static POINT_PTR: Shape = Shape::pointer(&POINT);
static CREATED: Shape = Shape::scalar(ScalarType::Time).named("Created");

#[test]
fn test_every_shape_has_one_category() {
    recast_testhelpers::setup();

    let cases: &[(&'static Shape, ShapeCategory)] = &[
        (&builtins::BOOL, ShapeCategory::Bool),
        (&builtins::I16, ShapeCategory::Signed),
        (&builtins::U32, ShapeCategory::Unsigned),
        (&builtins::F32, ShapeCategory::Float),
        (&builtins::COMPLEX128, ShapeCategory::Complex),
        (&builtins::STRING, ShapeCategory::Text),
        (&builtins::BYTES, ShapeCategory::Bytes),
        (&builtins::TIME, ShapeCategory::Time),
        (&CREATED, ShapeCategory::Time),
        (&POINT, ShapeCategory::Struct),
        (&BY_NAME, ShapeCategory::Map),
        (&POINTS, ShapeCategory::Sequence),
        (&POINT_PTR, ShapeCategory::Pointer),
        (&builtins::ANY, ShapeCategory::Dynamic),
    ];
    for &(shape, expected) in cases {
        assert_eq!(shape.category(), expected, "{shape}");
        assert_eq!(classify(&Value::zero(shape)), expected, "{shape}");
    }
}

#[test]
fn test_kind_ignores_names() {
    recast_testhelpers::setup();

    assert_eq!(CREATED.kind(), builtins::TIME.kind());
    assert_eq!(POINTS.kind(), Kind::List);
    assert_eq!(builtins::U8.kind(), Kind::Scalar(ScalarType::U8));
}
