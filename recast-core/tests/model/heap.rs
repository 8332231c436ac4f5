use recast_core::{Field, Heap, Place, Shape, Value, builtins};

static LEAF: Shape = Shape::structure("Leaf", &[Field::new("V", &builtins::STRING)]);
static NODE: Shape = Shape::structure(
    "Node",
    &[Field::new("Id", &builtins::I32), Field::new("Leaf", &LEAF)],
);
static NODE_PTR: Shape = Shape::pointer(&NODE);
static NODES: Shape = Shape::list(&NODE);

#[test]
fn test_place_walks_nested_fields() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let ptr = heap.new_pointer(&NODE_PTR, Value::zero(&NODE)).unwrap();
    let place = Place::root(ptr.slot().unwrap()).field(1).field(0);

    *heap.place_mut(&place).unwrap() = Value::from("leaf");

    let node = heap.deref(&ptr).unwrap();
    assert_eq!(node.field("Leaf").and_then(|l| l.field("V")), Some(&Value::from("leaf")));
}

#[test]
fn test_place_into_list_element() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let list = heap
        .new_list(&NODES, vec![Value::zero(&NODE), Value::zero(&NODE)])
        .unwrap();
    let place = Place::element(list.slot().unwrap(), 1).field(0);

    *heap.place_mut(&place).unwrap() = Value::from(9i32);

    let items = heap.elements(&list).unwrap();
    assert_eq!(items[0].field("Id").and_then(Value::as_i64), Some(0));
    assert_eq!(items[1].field("Id").and_then(Value::as_i64), Some(9));
}

#[test]
fn test_place_out_of_bounds_is_none() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let list = heap.new_list(&NODES, vec![]).unwrap();
    assert!(heap.place(&Place::element(list.slot().unwrap(), 0)).is_none());
    assert!(heap.place(&Place::root(list.slot().unwrap())).is_none());
}

#[test]
fn test_len_of_counts_nil_as_empty() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    assert_eq!(heap.len_of(&Value::zero(&NODES)), Some(0));
    let list = heap.new_list(&NODES, vec![Value::zero(&NODE)]).unwrap();
    assert_eq!(heap.len_of(&list), Some(1));
    assert_eq!(heap.len_of(&Value::from(1i32)), None);
}

#[test]
fn test_new_list_rejects_foreign_items() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    assert!(heap.new_list(&NODES, vec![Value::from(1i32)]).is_none());
    assert!(heap.is_empty());
}
