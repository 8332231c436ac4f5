//! Bulk copies between maps and between lists.
//!
//! Copies are best-effort: entries that convert are written as they go, the
//! ones that don't are skipped, and the returned count says how many made
//! it. Nothing is rolled back.

use indexmap::IndexMap;
use recast_core::{Heap, Place, Repr, Shape, SlotId, Value};

use crate::{ReflectError, assignable_to, convert_value, debug, trace};

fn dest_shape(heap: &Heap, dest: &Place) -> Result<&'static Shape, ReflectError> {
    heap.place(dest)
        .map(Value::shape)
        .ok_or(ReflectError::DanglingSlot { slot: dest.slot })
}

fn write(heap: &mut Heap, dest: &Place, value: Value) -> Result<(), ReflectError> {
    *heap
        .place_mut(dest)
        .ok_or(ReflectError::DanglingSlot { slot: dest.slot })? = value;
    Ok(())
}

/// The backing slot of the map at `dest`, allocating an empty one with room
/// for `capacity` entries when the map is nil.
pub(crate) fn ensure_map(
    heap: &mut Heap,
    dest: &Place,
    capacity: usize,
) -> Result<SlotId, ReflectError> {
    let shape = dest_shape(heap, dest)?;
    let existing = heap.place(dest).and_then(Value::slot);
    if let Some(slot) = existing {
        return match heap.map(slot) {
            Some(_) => Ok(slot),
            None => Err(ReflectError::DanglingSlot { slot }),
        };
    }
    let slot = heap.alloc_map(IndexMap::with_capacity(capacity));
    debug!("allocated backing for nil {shape}");
    write(heap, dest, Value::from_parts(shape, Repr::Map(Some(slot))))?;
    Ok(slot)
}

/// The backing slot of the list at `dest`, allocating `initial` as its
/// items when the list is nil.
pub(crate) fn ensure_list(
    heap: &mut Heap,
    dest: &Place,
    initial: impl FnOnce() -> Vec<Value>,
) -> Result<SlotId, ReflectError> {
    let shape = dest_shape(heap, dest)?;
    let existing = heap.place(dest).and_then(Value::slot);
    if let Some(slot) = existing {
        return match heap.list(slot) {
            Some(_) => Ok(slot),
            None => Err(ReflectError::DanglingSlot { slot }),
        };
    }
    let slot = heap.alloc_list(initial());
    debug!("allocated backing for nil {shape}");
    write(heap, dest, Value::from_parts(shape, Repr::List(Some(slot))))?;
    Ok(slot)
}

/// Copy the entries of the map `src` into the map at `dest`. A dynamic
/// `src` is read as the value it holds.
///
/// Key types must be identical. With `overwrite`, and element types of the
/// same kind that are assignable, `dest` is made to share `src`'s backing.
/// Otherwise each entry whose value is assignable or convertible to the
/// destination's element type is inserted, and the rest are skipped.
///
/// Returns the number of entries the destination received.
pub fn copy_map(
    heap: &mut Heap,
    dest: &Place,
    src: &Value,
    overwrite: bool,
) -> Result<usize, ReflectError> {
    let src = src.as_dynamic().unwrap_or(src);
    let dest_shape = dest_shape(heap, dest)?;
    let dest_def = dest_shape.as_map().ok_or(ReflectError::WasNotA {
        expected: "map",
        actual: dest_shape,
    })?;
    let src_def = src.shape().as_map().ok_or(ReflectError::WasNotA {
        expected: "map",
        actual: src.shape(),
    })?;
    if !src_def.k.is(dest_def.k) {
        return Err(ReflectError::KeyTypeMismatch {
            expected: dest_def.k,
            actual: src_def.k,
        });
    }

    let entries: Vec<(Value, Value)> = match src.slot() {
        Some(slot) => heap
            .map(slot)
            .ok_or(ReflectError::DanglingSlot { slot })?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => Vec::new(),
    };

    if overwrite
        && src_def.v.kind() == dest_def.v.kind()
        && assignable_to(src_def.v, dest_def.v)
    {
        trace!("{dest_shape} now shares the backing of {}", src.shape());
        write(heap, dest, Value::from_parts(dest_shape, Repr::Map(src.slot())))?;
        return Ok(entries.len());
    }

    let slot = ensure_map(heap, dest, entries.len())?;
    let mut converted = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        match convert_value(&v, dest_def.v) {
            Some(v) => converted.push((k, v)),
            None => {
                trace!("skipping entry of {}: not convertible to {}", v.shape(), dest_def.v);
            }
        }
    }
    let count = converted.len();
    heap.map_mut(slot)
        .ok_or(ReflectError::DanglingSlot { slot })?
        .extend(converted);
    Ok(count)
}

/// Copy the items of the list `src` into the list at `dest`. A dynamic
/// `src` is read as the value it holds.
///
/// When element types share a kind and are assignable, `overwrite` makes
/// `dest` share `src`'s backing; without it items are copied one-to-one up
/// to the shorter length, a nil `dest` first getting zeroed items as long as
/// `src`. When element types differ each item is converted and the ones
/// that convert are appended in order, into a new backing: lists aliasing
/// the old one are not lengthened.
///
/// Returns the number of items written.
pub fn copy_slice(
    heap: &mut Heap,
    dest: &Place,
    src: &Value,
    overwrite: bool,
) -> Result<usize, ReflectError> {
    let src = src.as_dynamic().unwrap_or(src);
    let dest_shape = dest_shape(heap, dest)?;
    let dest_elem = dest_shape
        .as_list()
        .ok_or(ReflectError::WasNotA {
            expected: "slice",
            actual: dest_shape,
        })?
        .t;
    let src_elem = src
        .shape()
        .as_list()
        .ok_or(ReflectError::WasNotA {
            expected: "slice",
            actual: src.shape(),
        })?
        .t;

    let items: Vec<Value> = match src.slot() {
        Some(slot) => heap
            .list(slot)
            .ok_or(ReflectError::DanglingSlot { slot })?
            .clone(),
        None => Vec::new(),
    };

    if src_elem.kind() == dest_elem.kind() && assignable_to(src_elem, dest_elem) {
        if overwrite {
            trace!("{dest_shape} now shares the backing of {}", src.shape());
            write(heap, dest, Value::from_parts(dest_shape, Repr::List(src.slot())))?;
            return Ok(items.len());
        }
        let len = items.len();
        let slot = ensure_list(heap, dest, || vec![Value::zero(dest_elem); len])?;
        let backing = heap
            .list_mut(slot)
            .ok_or(ReflectError::DanglingSlot { slot })?;
        let mut count = 0;
        for (target, item) in backing.iter_mut().zip(&items) {
            if let Some(item) = convert_value(item, dest_elem) {
                *target = item;
                count += 1;
            }
        }
        return Ok(count);
    }

    let mut converted = Vec::with_capacity(items.len());
    for item in &items {
        match convert_value(item, dest_elem) {
            Some(item) => converted.push(item),
            None => {
                trace!("skipping item of {}: not convertible to {}", item.shape(), dest_elem);
            }
        }
    }
    append_list(heap, dest, converted)
}

/// Append `items` to the list at `dest` and return how many there were.
///
/// The destination is relinked to a new backing holding its old items
/// followed by `items`; values sharing the old backing keep their length.
pub(crate) fn append_list(
    heap: &mut Heap,
    dest: &Place,
    items: Vec<Value>,
) -> Result<usize, ReflectError> {
    let shape = dest_shape(heap, dest)?;
    let mut backing = match heap.place(dest).and_then(Value::slot) {
        Some(slot) => heap
            .list(slot)
            .ok_or(ReflectError::DanglingSlot { slot })?
            .clone(),
        None => Vec::new(),
    };
    let count = items.len();
    backing.extend(items);
    let slot = heap.alloc_list(backing);
    write(heap, dest, Value::from_parts(shape, Repr::List(Some(slot))))?;
    Ok(count)
}
