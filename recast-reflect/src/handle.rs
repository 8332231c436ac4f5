use recast_core::{Def, Heap, Place, Shape, Value};
use recast_path::{FieldMatcher, PathError};

use crate::copy::{append_list, ensure_map};
use crate::{Options, ReflectError, coerce, convert_value, populate, trace};

/// A handle on the value behind a pointer, for setting it, its fields, its
/// entries or its items.
///
/// The handle holds no storage of its own: every write lands in the heap,
/// visible through the pointer the handle was made from.
#[derive(Clone, Debug)]
pub struct ObjectInfo {
    place: Place,
    shape: &'static Shape,
    options: Options,
}

impl ObjectInfo {
    /// A handle on what `pointer` points to.
    pub fn new(heap: &Heap, pointer: &Value) -> Result<Self, ReflectError> {
        let place = crate::api::pointee(heap, pointer)?;
        Self::at(heap, place)
    }

    /// A handle on an arbitrary location.
    ///
    /// Field names given to [`ObjectInfo::set_field`] match exactly first,
    /// then ignoring ASCII case; see [`ObjectInfo::with_matcher`].
    pub fn at(heap: &Heap, place: Place) -> Result<Self, ReflectError> {
        let shape = heap
            .place(&place)
            .ok_or(ReflectError::DanglingSlot { slot: place.slot })?
            .shape();
        Ok(Self {
            place,
            shape,
            options: Options::default().matcher(FieldMatcher::NameIgnoreCase),
        })
    }

    /// Use `matcher` to pick fields in [`ObjectInfo::set_field`].
    pub fn with_matcher(mut self, matcher: FieldMatcher) -> Self {
        self.options.matcher = matcher;
        self
    }

    /// Replace all options, the matcher included.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// The options in use.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Name of the type behind the handle, empty for unnamed composites.
    pub fn class_name(&self) -> &'static str {
        self.shape.name.unwrap_or("")
    }

    /// Shape of the value behind the handle.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Where the value lives.
    pub fn place(&self) -> &Place {
        &self.place
    }

    /// The current value.
    pub fn value<'h>(&self, heap: &'h Heap) -> Result<&'h Value, ReflectError> {
        heap.place(&self.place)
            .ok_or(ReflectError::DanglingSlot {
                slot: self.place.slot,
            })
    }

    /// Replace the whole value. Maps and lists are copied with `overwrite`
    /// set; everything else goes through the coercion rules.
    pub fn set_value(&self, heap: &mut Heap, value: &Value) -> Result<bool, ReflectError> {
        populate(heap, &self.place, value, &self.options)
    }

    /// Set one field of a struct, or one entry of a map.
    ///
    /// For structs `name` is matched with the handle's matcher (by default
    /// the field name, then the field name ignoring case) and an unknown
    /// name is an error. For maps `name` is coerced to the key type and
    /// `value` converted to the element type; `Ok(false)` when either fails.
    /// Anything else reports `Ok(false)`.
    pub fn set_field(
        &self,
        heap: &mut Heap,
        name: &str,
        value: &Value,
    ) -> Result<bool, ReflectError> {
        match &self.shape.def {
            Def::Struct(def) => {
                let index = self.options.matcher.find(def, name).ok_or_else(|| {
                    PathError::FieldNotFound {
                        segment: name.to_owned(),
                        path: name.to_owned(),
                    }
                })?;
                populate(heap, &self.place.clone().field(index), value, &self.options)
            }
            Def::Map(def) => {
                let Some(key) = coerce(heap, def.k, &Value::from(name), &self.options)? else {
                    trace!("`{name}` is not a {} key", def.k);
                    return Ok(false);
                };
                let Some(value) = convert_value(value, def.v) else {
                    trace!("{} is not a {} entry", value.shape(), def.v);
                    return Ok(false);
                };
                let slot = ensure_map(heap, &self.place, 1)?;
                heap.map_mut(slot)
                    .ok_or(ReflectError::DanglingSlot { slot })?
                    .insert(key, value);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Append one item to a list. `Ok(false)` when this is not a list or
    /// `value` does not convert to its element type.
    ///
    /// Like Go's `append`, the list gets a new backing: other lists sharing
    /// the old one, such as the source of an earlier [`ObjectInfo::set_value`],
    /// keep their items.
    pub fn add_value(&self, heap: &mut Heap, value: &Value) -> Result<bool, ReflectError> {
        let Def::List(def) = &self.shape.def else {
            return Ok(false);
        };
        let Some(item) = convert_value(value, def.t) else {
            return Ok(false);
        };
        append_list(heap, &self.place, vec![item])?;
        Ok(true)
    }

    /// A handle on a fresh zero value of this collection's element type, in
    /// a slot of its own. `None` when this is not a list or map.
    pub fn new_elem(&self, heap: &mut Heap) -> Option<ObjectInfo> {
        let elem = match &self.shape.def {
            Def::List(def) => def.t,
            Def::Map(def) => def.v,
            _ => return None,
        };
        let slot = heap.alloc(Value::zero(elem));
        Some(ObjectInfo {
            place: Place::root(slot),
            shape: elem,
            options: self.options.clone(),
        })
    }
}
