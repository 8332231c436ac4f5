//! Entry points that start from a pointer value.

use recast_core::{Heap, Place, Shape, Value};
use recast_path::resolve_field;

use crate::{ObjectInfo, Options, ReflectError, assign, copy_map, copy_slice, populate};

/// Fails with [`ReflectError::NotAPointer`] unless `value` is a pointer.
pub fn must_ptr(value: &Value) -> Result<(), ReflectError> {
    match value.shape().as_pointer() {
        Some(_) => Ok(()),
        None => Err(ReflectError::NotAPointer {
            shape: value.shape(),
        }),
    }
}

/// Returns true for nil pointers, lists, maps, dynamic and opaque values.
pub fn is_nil(value: &Value) -> bool {
    value.is_nil()
}

/// Returns true when `value` is a pointer that can be written through.
pub fn can_set(value: &Value) -> bool {
    must_ptr(value).is_ok() && !value.is_nil()
}

/// The zero value of `shape`, or of its pointee when `shape` is a pointer.
pub fn new_value(shape: &'static Shape) -> Value {
    match shape.as_pointer() {
        Some(def) => Value::zero(def.pointee),
        None => Value::zero(shape),
    }
}

/// Location of what a non-nil pointer points to.
pub(crate) fn pointee(heap: &Heap, pointer: &Value) -> Result<Place, ReflectError> {
    must_ptr(pointer)?;
    let slot = pointer.slot().ok_or(ReflectError::NilPointer {
        shape: pointer.shape(),
    })?;
    match heap.value(slot) {
        Some(_) => Ok(Place::root(slot)),
        None => Err(ReflectError::DanglingSlot { slot }),
    }
}

/// Coerce `value` into what `dest` points to.
///
/// [`ReflectError::NotAssigned`] when no rule applies.
pub fn set_value_into(heap: &mut Heap, dest: &Value, value: &Value) -> Result<(), ReflectError> {
    let place = pointee(heap, dest)?;
    let shape = heap
        .place(&place)
        .map(Value::shape)
        .ok_or(ReflectError::DanglingSlot { slot: place.slot })?;
    if assign(heap, &place, value)? {
        Ok(())
    } else {
        Err(ReflectError::NotAssigned {
            dest: shape,
            src: value.shape(),
        })
    }
}

/// Like [`set_value_into`], answering only whether the value was set.
pub fn safe_set_value(heap: &mut Heap, dest: &Value, value: &Value) -> bool {
    match pointee(heap, dest) {
        Ok(place) => assign(heap, &place, value).unwrap_or(false),
        Err(_) => false,
    }
}

/// Copy the entries of `src` into the map `dest` points to, entry by entry.
pub fn copy_map_into(heap: &mut Heap, dest: &Value, src: &Value) -> Result<usize, ReflectError> {
    set_or_copy_map(heap, dest, src, false)
}

/// Copy `src` into the map `dest` points to; see [`copy_map`] for what
/// `overwrite` does.
pub fn set_or_copy_map(
    heap: &mut Heap,
    dest: &Value,
    src: &Value,
    overwrite: bool,
) -> Result<usize, ReflectError> {
    let place = pointee(heap, dest)?;
    copy_map(heap, &place, src, overwrite)
}

/// Copy the items of `src` into the list `dest` points to, item by item.
pub fn copy_slice_into(heap: &mut Heap, dest: &Value, src: &Value) -> Result<usize, ReflectError> {
    set_or_copy_slice(heap, dest, src, false)
}

/// Copy `src` into the list `dest` points to; see [`copy_slice`] for what
/// `overwrite` does.
pub fn set_or_copy_slice(
    heap: &mut Heap,
    dest: &Value,
    src: &Value,
    overwrite: bool,
) -> Result<usize, ReflectError> {
    let place = pointee(heap, dest)?;
    copy_slice(heap, &place, src, overwrite)
}

/// Set the field at the dotted `path` below the struct `root` points to,
/// matching segments by field name.
pub fn set_struct_field_value(
    heap: &mut Heap,
    root: &Value,
    path: &str,
    value: &Value,
) -> Result<(), ReflectError> {
    set_struct_field_value_with(heap, root, path, value, &Options::default())
}

/// Set the field at the dotted `path` below the struct `root` points to,
/// matching segments by the tag stored under `tag`.
pub fn set_struct_field_value_by_tag(
    heap: &mut Heap,
    root: &Value,
    path: &str,
    value: &Value,
    tag: &str,
) -> Result<(), ReflectError> {
    let opts = Options::default().tag(tag.to_owned());
    set_struct_field_value_with(heap, root, path, value, &opts)
}

/// Set the field at `path` below the struct `root` points to.
///
/// Map fields receive `value` through [`copy_map`] with `overwrite` set;
/// everything else goes through the coercion rules.
pub fn set_struct_field_value_with(
    heap: &mut Heap,
    root: &Value,
    path: &str,
    value: &Value,
    opts: &Options,
) -> Result<(), ReflectError> {
    let place = resolve_field(heap, root, path, &opts.matcher, opts.delimiter)?;
    let shape = heap
        .place(&place)
        .map(Value::shape)
        .ok_or(ReflectError::DanglingSlot { slot: place.slot })?;
    if populate(heap, &place, value, opts)? {
        Ok(())
    } else {
        Err(ReflectError::NotAssigned {
            dest: shape,
            src: value.shape(),
        })
    }
}

/// A handle on what `pointer` points to.
pub fn get_object_info(heap: &Heap, pointer: &Value) -> Result<ObjectInfo, ReflectError> {
    ObjectInfo::new(heap, pointer)
}
