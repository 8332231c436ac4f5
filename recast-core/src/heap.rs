//! The slot arena that owns all reference-typed storage.

use core::fmt;

use indexmap::IndexMap;

use crate::{Def, FormattedValue, Repr, Shape, Value, trace};

/// Index of a slot in a [`Heap`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SlotId(usize);

impl SlotId {
    /// Position of the slot in its heap.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One arena cell.
#[derive(Clone, Debug)]
pub enum Slot {
    /// Storage behind a pointer
    Value(Value),
    /// Backing of a list
    List(Vec<Value>),
    /// Backing of a map, in insertion order
    Map(IndexMap<Value, Value>),
}

/// An addressable location: a slot, an element of it when the slot backs a
/// list, then a walk through struct fields by index.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Place {
    /// The slot the location lives in.
    pub slot: SlotId,
    /// Element index, when `slot` backs a list.
    pub index: Option<usize>,
    /// Struct field indices, outermost first.
    pub fields: Vec<u32>,
}

impl Place {
    /// The whole value behind a pointer slot.
    pub fn root(slot: SlotId) -> Self {
        Self {
            slot,
            index: None,
            fields: Vec::new(),
        }
    }

    /// One element of a list slot.
    pub fn element(slot: SlotId, index: usize) -> Self {
        Self {
            slot,
            index: Some(index),
            fields: Vec::new(),
        }
    }

    /// Descend into field `index` of the struct at this location.
    pub fn field(mut self, index: usize) -> Self {
        self.fields.push(index as u32);
        self
    }
}

/// Arena of slots. Slots live as long as the heap does.
#[derive(Clone, Default, Debug)]
pub struct Heap {
    slots: Vec<Slot>,
}

impl Heap {
    /// An empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true when nothing was allocated yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn push(&mut self, slot: Slot) -> SlotId {
        let id = SlotId(self.slots.len());
        self.slots.push(slot);
        id
    }

    /// Allocate a slot holding `value`.
    pub fn alloc(&mut self, value: Value) -> SlotId {
        trace!("alloc value {} in slot {}", value.shape(), self.slots.len());
        self.push(Slot::Value(value))
    }

    /// Allocate a list backing.
    pub fn alloc_list(&mut self, items: Vec<Value>) -> SlotId {
        trace!("alloc list of {} in slot {}", items.len(), self.slots.len());
        self.push(Slot::List(items))
    }

    /// Allocate a map backing.
    pub fn alloc_map(&mut self, entries: IndexMap<Value, Value>) -> SlotId {
        trace!("alloc map of {} in slot {}", entries.len(), self.slots.len());
        self.push(Slot::Map(entries))
    }

    /// A slot by id.
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0)
    }

    /// A mutable slot by id.
    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.slots.get_mut(id.0)
    }

    /// The value in a pointer slot.
    pub fn value(&self, id: SlotId) -> Option<&Value> {
        match self.slot(id)? {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The mutable value in a pointer slot.
    pub fn value_mut(&mut self, id: SlotId) -> Option<&mut Value> {
        match self.slot_mut(id)? {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The items of a list slot.
    pub fn list(&self, id: SlotId) -> Option<&Vec<Value>> {
        match self.slot(id)? {
            Slot::List(items) => Some(items),
            _ => None,
        }
    }

    /// The mutable items of a list slot.
    pub fn list_mut(&mut self, id: SlotId) -> Option<&mut Vec<Value>> {
        match self.slot_mut(id)? {
            Slot::List(items) => Some(items),
            _ => None,
        }
    }

    /// The entries of a map slot.
    pub fn map(&self, id: SlotId) -> Option<&IndexMap<Value, Value>> {
        match self.slot(id)? {
            Slot::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// The mutable entries of a map slot.
    pub fn map_mut(&mut self, id: SlotId) -> Option<&mut IndexMap<Value, Value>> {
        match self.slot_mut(id)? {
            Slot::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Allocate `value` and return a pointer of shape `pointer` to it.
    ///
    /// `None` when `pointer` is not a pointer shape to `value`'s shape.
    pub fn new_pointer(&mut self, pointer: &'static Shape, value: Value) -> Option<Value> {
        if !pointer.as_pointer()?.pointee.is(value.shape()) {
            return None;
        }
        let slot = self.alloc(value);
        Some(Value::from_parts(pointer, Repr::Pointer(Some(slot))))
    }

    /// Allocate a list of shape `list`.
    ///
    /// `None` when an item does not have the list's element shape.
    pub fn new_list(&mut self, list: &'static Shape, items: Vec<Value>) -> Option<Value> {
        let elem = list.as_list()?.t;
        if !items.iter().all(|item| item.shape().is(elem)) {
            return None;
        }
        let slot = self.alloc_list(items);
        Some(Value::from_parts(list, Repr::List(Some(slot))))
    }

    /// Allocate a map of shape `map`.
    ///
    /// `None` when an entry does not have the map's key and value shapes.
    pub fn new_map(
        &mut self,
        map: &'static Shape,
        entries: impl IntoIterator<Item = (Value, Value)>,
    ) -> Option<Value> {
        let def = map.as_map()?;
        let mut backing = IndexMap::new();
        for (k, v) in entries {
            if !k.shape().is(def.k) || !v.shape().is(def.v) {
                return None;
            }
            backing.insert(k, v);
        }
        let slot = self.alloc_map(backing);
        Some(Value::from_parts(map, Repr::Map(Some(slot))))
    }

    /// What a non-nil pointer points to.
    pub fn deref(&self, pointer: &Value) -> Option<&Value> {
        match pointer.repr() {
            Repr::Pointer(Some(slot)) => self.value(*slot),
            _ => None,
        }
    }

    /// The items of a non-nil list.
    pub fn elements(&self, list: &Value) -> Option<&[Value]> {
        match list.repr() {
            Repr::List(Some(slot)) => self.list(*slot).map(Vec::as_slice),
            _ => None,
        }
    }

    /// The entries of a non-nil map.
    pub fn entries(&self, map: &Value) -> Option<&IndexMap<Value, Value>> {
        match map.repr() {
            Repr::Map(Some(slot)) => self.map(*slot),
            _ => None,
        }
    }

    /// Number of items of a list or entries of a map; nil counts as empty.
    pub fn len_of(&self, collection: &Value) -> Option<usize> {
        match (&collection.shape().def, collection.repr()) {
            (Def::List(_), Repr::List(None)) | (Def::Map(_), Repr::Map(None)) => Some(0),
            (Def::List(_), _) => self.elements(collection).map(<[Value]>::len),
            (Def::Map(_), _) => self.entries(collection).map(IndexMap::len),
            _ => None,
        }
    }

    /// The value at a location.
    pub fn place(&self, place: &Place) -> Option<&Value> {
        let mut current = match place.index {
            None => self.value(place.slot)?,
            Some(index) => self.list(place.slot)?.get(index)?,
        };
        for &field in &place.fields {
            current = current.fields()?.get(field as usize)?;
        }
        Some(current)
    }

    /// The mutable value at a location.
    pub fn place_mut(&mut self, place: &Place) -> Option<&mut Value> {
        let mut current = match place.index {
            None => self.value_mut(place.slot)?,
            Some(index) => self.list_mut(place.slot)?.get_mut(index)?,
        };
        for &field in &place.fields {
            current = current.fields_mut()?.get_mut(field as usize)?;
        }
        Some(current)
    }

    /// Format `value` Go `%v` style, following references into this heap.
    pub fn display<'a>(&'a self, value: &'a Value) -> FormattedValue<'a> {
        FormattedValue::new(self, value)
    }
}
