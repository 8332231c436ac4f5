use recast_core::{Heap, Place, Repr, Value};

use crate::{FieldMatcher, PathError, debug, trace};

/// The separator [`resolve_field`] is usually called with.
pub const DEFAULT_DELIMITER: char = '.';

/// Walk `path` from the struct `root` points to, and return the location of
/// the field it names.
///
/// Segments are split on `delimiter` and matched with `matcher`. A nil
/// pointer-to-struct met on the way is filled with a zero struct allocated
/// in `heap`, so intermediate fields never stop the walk. The last field is
/// returned whatever its shape.
pub fn resolve_field(
    heap: &mut Heap,
    root: &Value,
    path: &str,
    matcher: &FieldMatcher,
    delimiter: char,
) -> Result<Place, PathError> {
    let shape = root.shape();
    if shape.as_pointer().is_none() {
        return Err(PathError::NotAPointer { shape });
    }
    let Some(slot) = root.slot() else {
        return Err(PathError::NilPointer { shape });
    };
    if heap.value(slot).is_none() {
        return Err(PathError::DanglingSlot { slot });
    }
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }

    trace!("resolving `{path}` by {matcher}");
    let mut place = Place::root(slot);
    let mut segments = path.split(delimiter).peekable();
    while let Some(segment) = segments.next() {
        let current = heap
            .place(&place)
            .ok_or(PathError::DanglingSlot { slot: place.slot })?;
        let Some(def) = current.shape().as_struct() else {
            return Err(PathError::NotAStruct {
                segment: segment.to_owned(),
                path: path.to_owned(),
                shape: current.shape(),
            });
        };
        let (index, field) = matcher
            .find(def, segment)
            .and_then(|index| Some((index, def.fields.get(index)?)))
            .ok_or_else(|| PathError::FieldNotFound {
                segment: segment.to_owned(),
                path: path.to_owned(),
            })?;
        place = place.field(index);

        if segments.peek().is_none() {
            break;
        }

        // step through pointer fields so the next segment sees the pointee
        let Some(pointer) = field.shape.as_pointer() else {
            continue;
        };
        let existing = heap
            .place(&place)
            .ok_or(PathError::DanglingSlot { slot: place.slot })?
            .slot();
        let target = match existing {
            Some(target) => target,
            None if pointer.pointee.as_struct().is_some() => {
                let target = heap.alloc(Value::zero(pointer.pointee));
                let link = Value::from_parts(field.shape, Repr::Pointer(Some(target)));
                *heap
                    .place_mut(&place)
                    .ok_or(PathError::DanglingSlot { slot: place.slot })? = link;
                debug!(
                    "allocated {} for nil field `{}` of `{path}`",
                    pointer.pointee, field.name
                );
                target
            }
            None => {
                return Err(PathError::NotAStruct {
                    segment: segments.peek().copied().unwrap_or_default().to_owned(),
                    path: path.to_owned(),
                    shape: field.shape,
                });
            }
        };
        place = Place::root(target);
    }
    Ok(place)
}
