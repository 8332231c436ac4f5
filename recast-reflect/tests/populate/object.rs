use recast_core::{Heap, Shape, Value, builtins};
use recast_path::{FieldMatcher, PathError};
use recast_reflect::{ObjectInfo, Options, ReflectError, Zone, get_object_info};

use crate::fixtures::*;

static TIME_PTR: Shape = Shape::pointer(&builtins::TIME);
static F32_PTR: Shape = Shape::pointer(&builtins::F32);
static TEST_TABLES_PTR: Shape = Shape::pointer(&TEST_TABLES);

fn table_handle(heap: &mut Heap) -> (Value, ObjectInfo) {
    let row = boxed(heap, &TEST_TABLE_PTR, Value::zero(&TEST_TABLE));
    let info = get_object_info(heap, &row)
        .unwrap()
        .with_matcher(FieldMatcher::name_or_tag("column"));
    (row, info)
}

#[test]
fn test_object_struct_fields() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let (row, info) = table_handle(&mut heap);
    assert_eq!(info.class_name(), "TestTable");

    assert_eq!(info.set_field(&mut heap, "Id", &Value::from("7")), Ok(true));
    assert_eq!(info.set_field(&mut heap, "username", &Value::from("john")), Ok(true));
    assert_eq!(
        info.set_field(&mut heap, "password", &Value::from(b"secret".to_vec())),
        Ok(true)
    );

    insta::assert_snapshot!(heap.display(&row), @"&{7 john secret}");
}

#[test]
fn test_object_struct_unknown_field() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let (_, info) = table_handle(&mut heap);
    let err = info
        .set_field(&mut heap, "email", &Value::from("a@b.c"))
        .unwrap_err();
    assert_eq!(
        err,
        ReflectError::Path(PathError::FieldNotFound {
            segment: "email".to_owned(),
            path: "email".to_owned(),
        })
    );

    // names only, exact
    let strict = ObjectInfo::at(&heap, info.place().clone())
        .unwrap()
        .with_matcher(FieldMatcher::Name);
    assert!(strict.set_field(&mut heap, "username", &Value::from("x")).is_err());
    assert_eq!(strict.set_field(&mut heap, "Username", &Value::from("x")), Ok(true));
}

#[test]
fn test_object_default_handle_ignores_case() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let row = boxed(&mut heap, &TEST_TABLE_PTR, Value::zero(&TEST_TABLE));
    let info = get_object_info(&heap, &row).unwrap();
    assert_eq!(info.options().matcher, FieldMatcher::NameIgnoreCase);

    let whole = Value::zero(&TEST_TABLE)
        .with_field("Username", Value::from("1"))
        .unwrap();
    assert_eq!(info.set_value(&mut heap, &whole), Ok(true));
    assert_eq!(info.set_field(&mut heap, "username", &Value::from("123")), Ok(true));
    assert_eq!(info.set_field(&mut heap, "ID", &Value::from(4i64)), Ok(true));
    insta::assert_snapshot!(heap.display(&row), @"&{4 123 }");

    assert_eq!(info.set_field(&mut heap, "password", &Value::from("x")), Ok(true));
    insta::assert_snapshot!(heap.display(&row), @"&{4 123 x}");
}

#[test]
fn test_object_simple_time() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let at = boxed(&mut heap, &TIME_PTR, Value::zero(&builtins::TIME));
    let info = get_object_info(&heap, &at)
        .unwrap()
        .with_options(Options::default().zone(Zone::Utc));
    assert_eq!(info.options().zone, Zone::Utc);
    assert_eq!(info.class_name(), "DateTime");

    assert_eq!(info.set_value(&mut heap, &Value::from("2022-07-01 19:00:00")), Ok(true));
    insta::assert_snapshot!(heap.display(&at), @"&2022-07-01 19:00:00 +0000");

    assert_eq!(info.set_value(&mut heap, &Value::from(0i64)), Ok(true));
    insta::assert_snapshot!(heap.display(info.value(&heap).unwrap()), @"1970-01-01 00:00:00 +0000");
}

#[test]
fn test_object_simple_float() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let x = boxed(&mut heap, &F32_PTR, Value::zero(&builtins::F32));
    let info = get_object_info(&heap, &x).unwrap();

    assert_eq!(info.set_value(&mut heap, &Value::from("3.25")), Ok(true));
    assert_eq!(info.value(&heap), Ok(&Value::from(3.25f32)));

    // integers are not floats
    assert_eq!(info.set_value(&mut heap, &Value::from(3i64)), Ok(false));
    assert_eq!(info.set_field(&mut heap, "x", &Value::from(1.0f32)), Ok(false));
    assert!(info.new_elem(&mut heap).is_none());
}

#[test]
fn test_object_map() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let m = boxed(&mut heap, &TEXT_INT_MAP_PTR, Value::zero(&TEXT_INT_MAP));
    let info = get_object_info(&heap, &m).unwrap();

    let err = info.set_value(&mut heap, &Value::from(1i64)).unwrap_err();
    insta::assert_snapshot!(err, @"was not a map: i64");

    assert_eq!(info.set_field(&mut heap, "a", &Value::from(5i32)), Ok(true));
    assert_eq!(info.set_field(&mut heap, "b", &Value::from(2i64)), Ok(true));
    assert_eq!(info.set_field(&mut heap, "a", &Value::from(7i64)), Ok(true));
    // text does not convert to an integer entry
    assert_eq!(info.set_field(&mut heap, "c", &Value::from("3")), Ok(false));
    insta::assert_snapshot!(heap.display(&m), @"&map[a:7 b:2]");

    let other = heap
        .new_map(&INT_MAP, [(Value::from(1i64), Value::from(1i64))])
        .unwrap();
    let err = info.set_value(&mut heap, &other).unwrap_err();
    assert!(matches!(err, ReflectError::KeyTypeMismatch { .. }));
}

#[test]
fn test_object_map_keys_are_coerced() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let m = boxed(&mut heap, &INT_MAP_PTR, Value::zero(&INT_MAP));
    let info = get_object_info(&heap, &m).unwrap();

    assert_eq!(info.set_field(&mut heap, "3", &Value::from(30i64)), Ok(true));
    assert_eq!(info.set_field(&mut heap, "three", &Value::from(30i64)), Ok(false));
    insta::assert_snapshot!(heap.display(&m), @"&map[3:30]");

    let elem = info.new_elem(&mut heap).unwrap();
    assert!(elem.shape().is(&builtins::I64));
}

#[test]
fn test_object_list_add_value() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let xs = boxed(&mut heap, &INTS_PTR, Value::zero(&INTS));
    let info = get_object_info(&heap, &xs).unwrap();

    assert_eq!(info.add_value(&mut heap, &Value::from(1i64)), Ok(true));
    assert_eq!(info.add_value(&mut heap, &Value::from(2i32)), Ok(true));
    assert_eq!(info.add_value(&mut heap, &Value::from("3")), Ok(false));
    assert_eq!(ints(&heap, info.value(&heap).unwrap()), vec![1, 2]);

    let replacement = list(&mut heap, &INT32S, vec![Value::from(9i32)]);
    assert_eq!(info.set_value(&mut heap, &replacement), Ok(true));
    assert_eq!(ints(&heap, info.value(&heap).unwrap()), vec![1, 2, 9]);
}

#[test]
fn test_object_add_value_leaves_aliased_source_alone() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let xs = boxed(&mut heap, &INTS_PTR, Value::zero(&INTS));
    let info = get_object_info(&heap, &xs).unwrap();
    let src = list(&mut heap, &INTS, vec![Value::from(1i64)]);

    assert_eq!(info.set_value(&mut heap, &src), Ok(true));
    assert_eq!(info.value(&heap).unwrap().slot(), src.slot());

    assert_eq!(info.add_value(&mut heap, &Value::from(2i64)), Ok(true));
    assert_eq!(ints(&heap, info.value(&heap).unwrap()), vec![1, 2]);
    assert_eq!(ints(&heap, &src), vec![1]);
}

#[test]
fn test_object_list_of_structs() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let rows = boxed(&mut heap, &TEST_TABLES_PTR, Value::zero(&TEST_TABLES));
    let info = get_object_info(&heap, &rows)
        .unwrap()
        .with_matcher(FieldMatcher::name_or_tag("column"));
    assert_eq!(info.class_name(), "");
    assert_eq!(info.set_field(&mut heap, "id", &Value::from(1i64)), Ok(false));

    for (id, name) in [("1", "ann"), ("2", "bob")] {
        let elem = info.new_elem(&mut heap).unwrap();
        assert_eq!(elem.class_name(), "TestTable");
        assert_eq!(elem.options(), info.options());
        elem.set_field(&mut heap, "id", &Value::from(id)).unwrap();
        elem.set_field(&mut heap, "username", &Value::from(name)).unwrap();
        let row = elem.value(&heap).cloned().unwrap();
        assert_eq!(info.add_value(&mut heap, &row), Ok(true));
    }

    insta::assert_snapshot!(heap.display(&rows), @"&[{1 ann } {2 bob }]");
}

#[test]
fn test_object_requires_live_pointer() {
    recast_testhelpers::setup();

    let heap = Heap::new();
    let err = get_object_info(&heap, &Value::from(1i64)).unwrap_err();
    insta::assert_snapshot!(err, @"object is not a pointer: i64");

    let err = get_object_info(&heap, &Value::zero(&INTS_PTR)).unwrap_err();
    insta::assert_snapshot!(err, @"nil object: *[]i64");

    let mut elsewhere = Heap::new();
    let foreign = boxed(&mut elsewhere, &INTS_PTR, Value::zero(&INTS));
    let err = get_object_info(&heap, &foreign).unwrap_err();
    assert!(matches!(err, ReflectError::DanglingSlot { .. }));
}
