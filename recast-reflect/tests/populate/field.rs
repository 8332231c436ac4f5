use recast_core::{Heap, Opaque, Value};
use recast_path::PathError;
use recast_reflect::{
    Options, ReflectError, set_struct_field_value, set_struct_field_value_by_tag,
    set_struct_field_value_with,
};

use crate::fixtures::*;

/// The branch `C` of the root behind `root`.
fn branch(heap: &Heap, root: &Value) -> Value {
    let c = heap.deref(root).unwrap().field("C").unwrap();
    heap.deref(c).cloned().unwrap()
}

/// Path spellings paired with the options that resolve them: plain field
/// names, then `json` tags.
fn namings() -> [(fn(&str) -> String, Options); 2] {
    [
        (<str as ToOwned>::to_owned, Options::default()),
        (str::to_lowercase, Options::default().tag("json")),
    ]
}

#[test]
fn test_field_preconditions() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let root = root(&mut heap);
    let err = set_struct_field_value(&mut heap, &root, "", &Value::from(1i64)).unwrap_err();
    assert_eq!(err, ReflectError::Path(PathError::EmptyPath));

    let err = set_struct_field_value(
        &mut heap,
        &Value::zero(&ROOT),
        "A",
        &Value::from(1i64),
    )
    .unwrap_err();
    insta::assert_snapshot!(err, @"object is not a pointer: testRootStruct");

    let err =
        set_struct_field_value(&mut heap, &Value::zero(&ROOT_PTR), "A", &Value::from(1i64))
            .unwrap_err();
    insta::assert_snapshot!(err, @"nil object: *testRootStruct");
}

#[test]
fn test_field_scalars() {
    recast_testhelpers::setup();

    for (path, opts) in namings() {
        let heap = &mut Heap::new();
        let root = root(heap);
        set_struct_field_value_with(heap, &root, &path("A"), &Value::from(123i64), &opts).unwrap();
        set_struct_field_value_with(heap, &root, &path("B.S"), &Value::from("hello"), &opts)
            .unwrap();
        set_struct_field_value_with(heap, &root, &path("B.B"), &Value::from("true"), &opts)
            .unwrap();

        let value = heap.deref(&root).unwrap();
        assert_eq!(value.field("A"), Some(&Value::from(123i64)));
        let b = value.field("B").unwrap();
        assert_eq!(b.field("S"), Some(&Value::from("hello")));
        assert_eq!(b.field("B"), Some(&Value::from(true)));
    }
}

#[test]
fn test_field_through_nil_pointer() {
    recast_testhelpers::setup();

    for (path, opts) in namings() {
        let heap = &mut Heap::new();
        let root = root(heap);
        let when = "2022-07-01 19:00:00";
        set_struct_field_value_with(heap, &root, &path("C.T"), &Value::from(when), &opts).unwrap();

        let t = branch(heap, &root).field("T").and_then(Value::as_time).unwrap();
        assert_eq!(t.format("%Y-%m-%d %H:%M:%S").to_string(), when);
    }
}

#[test]
fn test_field_whole_struct_and_pointer() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let root = root(&mut heap);
    let b = Value::zero(&BRANCH).with_field("S", Value::from("inline")).unwrap();
    set_struct_field_value(&mut heap, &root, "B", &b).unwrap();

    let c = boxed(
        &mut heap,
        &BRANCH_PTR,
        Value::zero(&BRANCH).with_field("S", Value::from("behind")).unwrap(),
    );
    set_struct_field_value(&mut heap, &root, "C", &c).unwrap();

    let value = heap.deref(&root).unwrap();
    assert_eq!(value.field("B"), Some(&b));
    assert_eq!(value.field("C").and_then(Value::slot), c.slot());
    assert_eq!(
        branch(&heap, &root).field("S"),
        Some(&Value::from("behind"))
    );

    // a struct is not a pointer to one
    let err = set_struct_field_value(&mut heap, &root, "C", &b).unwrap_err();
    insta::assert_snapshot!(err, @"cannot assign testBranchStruct to *testBranchStruct");
}

#[test]
fn test_field_dynamic_and_bytes() {
    recast_testhelpers::setup();

    for (path, opts) in namings() {
        let heap = &mut Heap::new();
        let root = root(heap);
        let named = Value::from("hello").with_shape(&TEST_STR).unwrap();
        set_struct_field_value_with(heap, &root, &path("I"), &named, &opts).unwrap();
        set_struct_field_value_with(heap, &root, &path("D"), &Value::from(b"hi".to_vec()), &opts)
            .unwrap();

        let value = heap.deref(&root).unwrap();
        assert_eq!(value.field("I").and_then(Value::as_dynamic), Some(&named));
        assert_eq!(value.field("D").and_then(Value::as_bytes), Some(&b"hi"[..]));

        set_struct_field_value_with(heap, &root, &path("D"), &Value::from("world"), &opts)
            .unwrap();
        let value = heap.deref(&root).unwrap();
        assert_eq!(value.field("D").and_then(Value::as_bytes), Some(&b"world"[..]));
    }
}

#[test]
fn test_field_collections() {
    recast_testhelpers::setup();

    for (path, opts) in namings() {
        let heap = &mut Heap::new();
        let root = root(heap);
        let hello = Value::from("hello").with_shape(&TEST_STR).unwrap();
        let world = Value::from("world").with_shape(&TEST_STR).unwrap();

        let strs = list(heap, &TEST_STRS, vec![hello.clone(), world.clone()]);
        set_struct_field_value_with(heap, &root, &path("C.SS"), &strs, &opts).unwrap();

        let map = heap
            .new_map(
                &TEST_STR_MAP,
                [
                    (Value::from("hello"), hello.clone()),
                    (Value::from("world"), world.clone()),
                ],
            )
            .unwrap();
        set_struct_field_value_with(heap, &root, &path("C.M"), &map, &opts).unwrap();

        let c = branch(heap, &root);
        let items = heap.elements(c.field("SS").unwrap()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].as_dynamic(), Some(&world));

        let entries = heap.entries(c.field("M").unwrap()).unwrap();
        assert_eq!(
            entries.get(&Value::from("hello")).and_then(Value::as_dynamic),
            Some(&hello)
        );
        assert_eq!(
            heap.display(c.field("M").unwrap()).to_string(),
            "map[hello:hello world:world]"
        );
    }
}

#[test]
fn test_field_from_dynamic_row_values() {
    recast_testhelpers::setup();

    for (path, opts) in namings() {
        let heap = &mut Heap::new();
        let root = root(heap);
        let strs = list(heap, &STRINGS, vec![Value::from("x"), Value::from("y")]);
        let map = heap
            .new_map(&TEXT_INT_MAP, [(Value::from("n"), Value::from(1i64))])
            .unwrap();

        let row = [
            ("A", Value::dynamic(Value::from("5"))),
            ("C.SS", Value::dynamic(strs)),
            ("C.M", Value::dynamic(map)),
        ];
        for (field, value) in &row {
            set_struct_field_value_with(heap, &root, &path(field), value, &opts).unwrap();
        }

        assert_eq!(heap.deref(&root).unwrap().field("A"), Some(&Value::from(5i64)));
        let c = branch(heap, &root);
        assert_eq!(heap.display(c.field("SS").unwrap()).to_string(), "[x y]");
        assert_eq!(heap.display(c.field("M").unwrap()).to_string(), "map[n:1]");
    }
}

#[test]
fn test_field_opaque() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let root = root(&mut heap);
    let timer = Value::opaque(&TIMER, Opaque::new(())).unwrap();
    set_struct_field_value_by_tag(&mut heap, &root, "c.chan", &timer, "json").unwrap();
    assert_eq!(branch(&heap, &root).field("Chan"), Some(&timer));

    let err = set_struct_field_value(&mut heap, &root, "C.Chan", &Value::from(1i64)).unwrap_err();
    insta::assert_snapshot!(err, @"cannot assign i64 to Receiver<Instant>");
}

#[test]
fn test_field_not_found() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let root = root(&mut heap);
    let err = set_struct_field_value(&mut heap, &root, "B.X", &Value::from(1i64)).unwrap_err();
    insta::assert_snapshot!(err, @"field not found: segment `X` in path `B.X`");

    // tags do not match by field name
    let err = set_struct_field_value_by_tag(&mut heap, &root, "A", &Value::from(1i64), "json")
        .unwrap_err();
    assert!(matches!(
        err,
        ReflectError::Path(PathError::FieldNotFound { .. })
    ));
}
