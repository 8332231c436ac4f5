use crate::{Def, ScalarType, Shape, Value};

/// The coarse classification coercion rules are keyed on.
///
/// Every shape maps to exactly one category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShapeCategory {
    /// `bool`
    Bool,
    /// Signed integers of any width
    Signed,
    /// Unsigned integers of any width
    Unsigned,
    /// `f32` and `f64`
    Float,
    /// Complex numbers of either precision
    Complex,
    /// Text
    Text,
    /// Byte buffers
    Bytes,
    /// Time instants, including named time types
    Time,
    /// Structs
    Struct,
    /// Maps
    Map,
    /// Lists
    Sequence,
    /// Pointers
    Pointer,
    /// Holds any value
    Dynamic,
    /// Anything the engine cannot look into
    Unsupported,
}

/// Fine-grained kind of a shape, width-specific.
///
/// Two values share a kind when they would share a reflection kind: `i32`
/// and a named type over `i32` do, `i32` and `i64` do not.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    /// A scalar of the given type
    Scalar(ScalarType),
    /// A struct
    Struct,
    /// A map
    Map,
    /// A list
    List,
    /// A pointer
    Pointer,
    /// A dynamic value
    Dynamic,
    /// An opaque value
    Opaque,
}

impl Shape {
    /// Classify this shape.
    pub fn category(&self) -> ShapeCategory {
        match self.def {
            // time is checked first, whatever the shape is named
            Def::Scalar(ScalarType::Time) => ShapeCategory::Time,
            Def::Scalar(ScalarType::Bool) => ShapeCategory::Bool,
            Def::Scalar(s) if s.is_signed() => ShapeCategory::Signed,
            Def::Scalar(s) if s.is_unsigned() => ShapeCategory::Unsigned,
            Def::Scalar(s) if s.is_float() => ShapeCategory::Float,
            Def::Scalar(s) if s.is_complex() => ShapeCategory::Complex,
            Def::Scalar(ScalarType::String) => ShapeCategory::Text,
            Def::Scalar(ScalarType::Bytes) => ShapeCategory::Bytes,
            Def::Scalar(_) => ShapeCategory::Unsupported,
            Def::Struct(_) => ShapeCategory::Struct,
            Def::Map(_) => ShapeCategory::Map,
            Def::List(_) => ShapeCategory::Sequence,
            Def::Pointer(_) => ShapeCategory::Pointer,
            Def::Dynamic => ShapeCategory::Dynamic,
            Def::Opaque => ShapeCategory::Unsupported,
        }
    }

    /// The fine-grained kind of this shape.
    pub fn kind(&self) -> Kind {
        match self.def {
            Def::Scalar(s) => Kind::Scalar(s),
            Def::Struct(_) => Kind::Struct,
            Def::Map(_) => Kind::Map,
            Def::List(_) => Kind::List,
            Def::Pointer(_) => Kind::Pointer,
            Def::Dynamic => Kind::Dynamic,
            Def::Opaque => Kind::Opaque,
        }
    }
}

/// Classify a value by its shape.
pub fn classify(value: &Value) -> ShapeCategory {
    value.shape().category()
}
