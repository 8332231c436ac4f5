//! Dynamic values: a shape plus a payload that matches it.

use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use num_complex::{Complex, Complex64};

use crate::{Def, ScalarType, Shape, SlotId, builtins};

/// The zero time instant, `0001-01-01 00:00:00 UTC`.
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        .unwrap_or_default()
}

/// Something the engine cannot look into: a channel, a callback, a handle.
///
/// Clones share the same allocation. Equality and hashing go by address.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    /// Wrap any value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Hash for Opaque {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Pointer for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.addr(), f)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:p})", self.addr())
    }
}

/// The payload of a [`Value`].
///
/// Reference-typed payloads (`Pointer`, `List`, `Map`) name a heap slot,
/// `None` meaning nil.
#[derive(Clone, PartialEq, Debug)]
pub enum Repr {
    /// `bool`
    Bool(bool),
    /// Any signed integer, wrapped to the shape's width
    Int(i64),
    /// Any unsigned integer, wrapped to the shape's width
    Uint(u64),
    /// `f32` (held rounded to single precision) or `f64`
    Float(f64),
    /// Either complex type
    Complex(Complex64),
    /// Text
    String(String),
    /// Byte buffer
    Bytes(Vec<u8>),
    /// Time instant
    Time(DateTime<FixedOffset>),
    /// Struct fields, in declaration order
    Struct(Vec<Value>),
    /// Pointer to a single-value slot
    Pointer(Option<SlotId>),
    /// List backed by a list slot
    List(Option<SlotId>),
    /// Map backed by a map slot
    Map(Option<SlotId>),
    /// Boxed value of any shape
    Dynamic(Option<Box<Value>>),
    /// Something opaque
    Opaque(Option<Opaque>),
}

impl Repr {
    /// Returns true when this payload can be held by a value of `shape`.
    pub fn fits(&self, shape: &Shape) -> bool {
        match (&shape.def, self) {
            (Def::Scalar(ScalarType::Bool), Repr::Bool(_)) => true,
            (Def::Scalar(s), Repr::Int(_)) => s.is_signed(),
            (Def::Scalar(s), Repr::Uint(_)) => s.is_unsigned(),
            (Def::Scalar(s), Repr::Float(_)) => s.is_float(),
            (Def::Scalar(s), Repr::Complex(_)) => s.is_complex(),
            (Def::Scalar(ScalarType::String), Repr::String(_)) => true,
            (Def::Scalar(ScalarType::Bytes), Repr::Bytes(_)) => true,
            (Def::Scalar(ScalarType::Time), Repr::Time(_)) => true,
            (Def::Struct(def), Repr::Struct(values)) => {
                values.len() == def.fields.len()
                    && values
                        .iter()
                        .zip(def.fields)
                        .all(|(value, field)| value.shape.is(field.shape))
            }
            (Def::Pointer(_), Repr::Pointer(_)) => true,
            (Def::List(_), Repr::List(_)) => true,
            (Def::Map(_), Repr::Map(_)) => true,
            (Def::Dynamic, Repr::Dynamic(_)) => true,
            (Def::Opaque, Repr::Opaque(_)) => true,
            _ => false,
        }
    }

    fn normalize(self, shape: &Shape) -> Self {
        match (shape.scalar_type(), self) {
            (Some(ScalarType::I8), Repr::Int(v)) => Repr::Int(v as i8 as i64),
            (Some(ScalarType::I16), Repr::Int(v)) => Repr::Int(v as i16 as i64),
            (Some(ScalarType::I32), Repr::Int(v)) => Repr::Int(v as i32 as i64),
            (Some(ScalarType::U8), Repr::Uint(v)) => Repr::Uint(v as u8 as u64),
            (Some(ScalarType::U16), Repr::Uint(v)) => Repr::Uint(v as u16 as u64),
            (Some(ScalarType::U32), Repr::Uint(v)) => Repr::Uint(v as u32 as u64),
            (Some(ScalarType::F32), Repr::Float(v)) => Repr::Float(v as f32 as f64),
            (Some(ScalarType::Complex64), Repr::Complex(c)) => {
                Repr::Complex(Complex::new(c.re as f32 as f64, c.im as f32 as f64))
            }
            (_, repr) => repr,
        }
    }
}

fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    // -0.0 == 0.0, so they must hash alike
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

impl Hash for Repr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Repr::Bool(v) => v.hash(state),
            Repr::Int(v) => v.hash(state),
            Repr::Uint(v) => v.hash(state),
            Repr::Float(v) => hash_f64(*v, state),
            Repr::Complex(c) => {
                hash_f64(c.re, state);
                hash_f64(c.im, state);
            }
            Repr::String(v) => v.hash(state),
            Repr::Bytes(v) => v.hash(state),
            Repr::Time(v) => v.hash(state),
            Repr::Struct(v) => v.hash(state),
            Repr::Pointer(v) | Repr::List(v) | Repr::Map(v) => v.hash(state),
            Repr::Dynamic(v) => v.hash(state),
            Repr::Opaque(v) => v.hash(state),
        }
    }
}

/// A value of some [`Shape`].
///
/// The payload always fits the shape. Cloning a value deep-copies struct
/// contents but shares heap slots, so pointers, lists and maps alias.
#[derive(Clone)]
pub struct Value {
    shape: &'static Shape,
    repr: Repr,
}

impl Value {
    /// Pair a shape with a payload, or `None` if the payload does not fit.
    pub fn new(shape: &'static Shape, repr: Repr) -> Option<Self> {
        if !repr.fits(shape) {
            return None;
        }
        Some(Self::from_parts(shape, repr))
    }

    /// Like [`Value::new`], for callers that already know the payload fits.
    pub fn from_parts(shape: &'static Shape, repr: Repr) -> Self {
        debug_assert!(repr.fits(shape), "payload {repr:?} does not fit {shape}");
        Self {
            shape,
            repr: repr.normalize(shape),
        }
    }

    /// The zero value of `shape`: false, 0, empty text, the zero instant,
    /// nil references, and structs of zero fields.
    pub fn zero(shape: &'static Shape) -> Self {
        let repr = match &shape.def {
            Def::Scalar(ScalarType::Bool) => Repr::Bool(false),
            Def::Scalar(s) if s.is_signed() => Repr::Int(0),
            Def::Scalar(s) if s.is_unsigned() => Repr::Uint(0),
            Def::Scalar(s) if s.is_float() => Repr::Float(0.0),
            Def::Scalar(s) if s.is_complex() => Repr::Complex(Complex64::new(0.0, 0.0)),
            Def::Scalar(ScalarType::Bytes) => Repr::Bytes(Vec::new()),
            Def::Scalar(ScalarType::Time) => Repr::Time(zero_time()),
            Def::Scalar(_) => Repr::String(String::new()),
            Def::Struct(def) => Repr::Struct(def.fields.iter().map(|f| Value::zero(f.shape)).collect()),
            Def::Map(_) => Repr::Map(None),
            Def::List(_) => Repr::List(None),
            Def::Pointer(_) => Repr::Pointer(None),
            Def::Dynamic => Repr::Dynamic(None),
            Def::Opaque => Repr::Opaque(None),
        };
        Self { shape, repr }
    }

    /// A dynamic ("any") value holding `inner`.
    pub fn dynamic(inner: Value) -> Self {
        Self {
            shape: &builtins::ANY,
            repr: Repr::Dynamic(Some(Box::new(inner))),
        }
    }

    /// An opaque value, or `None` when `shape` is not opaque.
    pub fn opaque(shape: &'static Shape, handle: Opaque) -> Option<Self> {
        Self::new(shape, Repr::Opaque(Some(handle)))
    }

    /// Replace a struct field by name. `None` when this is not a struct, the
    /// field does not exist, or `value` has the wrong shape.
    pub fn with_field(mut self, name: &str, value: Value) -> Option<Self> {
        let field = self.shape.as_struct()?.field_index(name)?;
        let slot = self.fields_mut()?.get_mut(field)?;
        if !slot.shape.is(value.shape) {
            return None;
        }
        *slot = value;
        Some(self)
    }

    /// The same payload under another shape, if it fits.
    pub fn with_shape(self, shape: &'static Shape) -> Option<Self> {
        Self::new(shape, self.repr)
    }

    /// The shape of this value.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// The payload.
    pub fn repr(&self) -> &Repr {
        &self.repr
    }

    /// Take the payload.
    pub fn into_repr(self) -> Repr {
        self.repr
    }

    /// Returns true for nil pointers, lists, maps, dynamic and opaque values.
    pub fn is_nil(&self) -> bool {
        matches!(
            self.repr,
            Repr::Pointer(None)
                | Repr::List(None)
                | Repr::Map(None)
                | Repr::Dynamic(None)
                | Repr::Opaque(None)
        )
    }

    /// The slot a pointer, list or map refers to.
    pub fn slot(&self) -> Option<SlotId> {
        match self.repr {
            Repr::Pointer(slot) | Repr::List(slot) | Repr::Map(slot) => slot,
            _ => None,
        }
    }

    /// `bool` payload
    pub fn as_bool(&self) -> Option<bool> {
        match self.repr {
            Repr::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Signed integer payload
    pub fn as_i64(&self) -> Option<i64> {
        match self.repr {
            Repr::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Unsigned integer payload
    pub fn as_u64(&self) -> Option<u64> {
        match self.repr {
            Repr::Uint(v) => Some(v),
            _ => None,
        }
    }

    /// Float payload
    pub fn as_f64(&self) -> Option<f64> {
        match self.repr {
            Repr::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Complex payload
    pub fn as_complex(&self) -> Option<Complex64> {
        match self.repr {
            Repr::Complex(v) => Some(v),
            _ => None,
        }
    }

    /// Text payload
    pub fn as_str(&self) -> Option<&str> {
        match &self.repr {
            Repr::String(v) => Some(v),
            _ => None,
        }
    }

    /// Byte payload
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.repr {
            Repr::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Time payload
    pub fn as_time(&self) -> Option<DateTime<FixedOffset>> {
        match self.repr {
            Repr::Time(v) => Some(v),
            _ => None,
        }
    }

    /// The value held by a dynamic value.
    pub fn as_dynamic(&self) -> Option<&Value> {
        match &self.repr {
            Repr::Dynamic(Some(inner)) => Some(inner),
            _ => None,
        }
    }

    /// The opaque handle.
    pub fn as_opaque(&self) -> Option<&Opaque> {
        match &self.repr {
            Repr::Opaque(Some(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Struct fields, in declaration order.
    pub fn fields(&self) -> Option<&[Value]> {
        match &self.repr {
            Repr::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Mutable struct fields, in declaration order.
    pub fn fields_mut(&mut self) -> Option<&mut [Value]> {
        match &mut self.repr {
            Repr::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// A struct field by literal name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        let index = self.shape.as_struct()?.field_index(name)?;
        self.fields()?.get(index)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.shape.is(other.shape) && self.repr == other.repr
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.name.hash(state);
        self.repr.hash(state);
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.shape, self.repr)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $shape:ident, $variant:ident;)*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::from_parts(&builtins::$shape, Repr::$variant(value.into()))
                }
            }
        )*
    };
}

impl_from! {
    bool => BOOL, Bool;
    i8 => I8, Int;
    i16 => I16, Int;
    i32 => I32, Int;
    i64 => I64, Int;
    u8 => U8, Uint;
    u16 => U16, Uint;
    u32 => U32, Uint;
    u64 => U64, Uint;
    f32 => F32, Float;
    f64 => F64, Float;
    String => STRING, String;
    &str => STRING, String;
    Vec<u8> => BYTES, Bytes;
    Complex64 => COMPLEX128, Complex;
    DateTime<FixedOffset> => TIME, Time;
}

impl From<Complex<f32>> for Value {
    fn from(value: Complex<f32>) -> Self {
        let widened = Complex64::new(value.re.into(), value.im.into());
        Value::from_parts(&builtins::COMPLEX64, Repr::Complex(widened))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::from_parts(&builtins::TIME, Repr::Time(value.fixed_offset()))
    }
}
