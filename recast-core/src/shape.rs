//! Type descriptors: [`Shape`], its [`Def`], and the pieces they are built from.
//!
//! Shapes are meant to live in static space. Declare them as `static` items
//! with the `const fn` builders below and hand out `&'static Shape`:
//!
//! ```
//! use recast_core::{Field, Shape, builtins};
//!
//! static ACCOUNT: Shape = Shape::structure(
//!     "Account",
//!     &[
//!         Field::new("Id", &builtins::I64).tags(&[("column", "id")]),
//!         Field::new("Username", &builtins::STRING).tags(&[("column", "username")]),
//!     ],
//! );
//! static ACCOUNT_PTR: Shape = Shape::pointer(&ACCOUNT);
//!
//! assert_eq!(ACCOUNT.to_string(), "Account");
//! assert_eq!(ACCOUNT_PTR.to_string(), "*Account");
//! ```

use core::fmt;

/// All scalar types supported out of the box.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// Complex number with `f32` parts.
    Complex64,
    /// Complex number with `f64` parts.
    Complex128,
    /// Owned UTF-8 text.
    String,
    /// Owned byte buffer.
    Bytes,
    /// A time instant with a UTC offset.
    Time,
}

impl ScalarType {
    /// The name builtin shapes of this scalar type carry.
    pub const fn type_name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::Complex64 => "Complex<f32>",
            ScalarType::Complex128 => "Complex<f64>",
            ScalarType::String => "String",
            ScalarType::Bytes => "Vec<u8>",
            ScalarType::Time => "DateTime",
        }
    }

    /// Returns true for the signed integer types.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarType::I8 | ScalarType::I16 | ScalarType::I32 | ScalarType::I64
        )
    }

    /// Returns true for the unsigned integer types.
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            ScalarType::U8 | ScalarType::U16 | ScalarType::U32 | ScalarType::U64
        )
    }

    /// Returns true for `f32` and `f64`.
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }

    /// Returns true for the two complex types.
    pub const fn is_complex(self) -> bool {
        matches!(self, ScalarType::Complex64 | ScalarType::Complex128)
    }
}

/// Describes a field in a struct
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// key for the struct field
    pub name: &'static str,

    /// shape of the inner type
    pub shape: &'static Shape,

    /// `(key, value)` tag pairs, e.g. `("json", "name,omitempty")`
    pub tags: &'static [(&'static str, &'static str)],
}

impl Field {
    /// A field without tags.
    pub const fn new(name: &'static str, shape: &'static Shape) -> Self {
        Self {
            name,
            shape,
            tags: &[],
        }
    }

    /// Replace the tag list.
    pub const fn tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Gets the value of the tag stored under `key`, up to its first `,`.
    ///
    /// A tag declared as `("json", "name,omitempty")` answers `Some("name")`.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| match value.split_once(',') {
                Some((head, _)) => head,
                None => value,
            })
    }
}

/// Fields of a struct type, in declaration order
#[derive(Clone, Copy, Debug)]
pub struct StructType {
    /// all fields, in declaration order
    pub fields: &'static [Field],
}

impl StructType {
    /// Index of the field with the given literal name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// The field with the given literal name.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Fields for map types
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// shape of the keys in the map
    pub k: &'static Shape,
    /// shape of the values in the map
    pub v: &'static Shape,
}

/// Fields for list types
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// shape of the items in the list
    pub t: &'static Shape,
}

/// Fields for pointer types
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// shape of the pointed-to value
    pub pointee: &'static Shape,
}

/// The semantic definition of a shape: is it more like a scalar, a map, a list?
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// A value that isn't composed of other things, e.g. `u32`, `String`, a time instant.
    Scalar(ScalarType),

    /// Named fields, stored inline.
    Struct(StructType),

    /// Keys are homogeneous, values are homogeneous. Storage lives in the heap.
    Map(MapDef),

    /// Ordered list of homogeneous values, variable size. Storage lives in the heap.
    List(ListDef),

    /// A nullable reference to a value living in its own heap slot.
    Pointer(PointerDef),

    /// Holds a value of any shape, or nothing.
    Dynamic,

    /// A value we cannot look into (channels, handles, callbacks).
    /// It can only be moved around whole.
    Opaque,
}

impl Def {
    fn same_structure(&self, other: &Def, compare_tags: bool) -> bool {
        match (self, other) {
            (Def::Scalar(a), Def::Scalar(b)) => a == b,
            (Def::Struct(a), Def::Struct(b)) => {
                a.fields.len() == b.fields.len()
                    && a.fields.iter().zip(b.fields).all(|(fa, fb)| {
                        fa.name == fb.name
                            && fa.shape.is(fb.shape)
                            && (!compare_tags || fa.tags == fb.tags)
                    })
            }
            (Def::Map(a), Def::Map(b)) => a.k.is(b.k) && a.v.is(b.v),
            (Def::List(a), Def::List(b)) => a.t.is(b.t),
            (Def::Pointer(a), Def::Pointer(b)) => a.pointee.is(b.pointee),
            (Def::Dynamic, Def::Dynamic) => true,
            (Def::Opaque, Def::Opaque) => true,
            _ => false,
        }
    }
}

/// Schema for reflection of a type.
///
/// A shape with no name is an unnamed composite such as a list, map or
/// pointer type; everything else is a named (defined) type.
#[derive(Clone, Copy)]
pub struct Shape {
    /// The declared type name, if any.
    pub name: Option<&'static str>,

    /// What the type is made of.
    pub def: Def,
}

impl Shape {
    /// A builtin scalar shape, named after its scalar type.
    pub const fn scalar(scalar: ScalarType) -> Self {
        Self {
            name: Some(scalar.type_name()),
            def: Def::Scalar(scalar),
        }
    }

    /// A named struct shape.
    pub const fn structure(name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name: Some(name),
            def: Def::Struct(StructType { fields }),
        }
    }

    /// An unnamed list of `t`.
    pub const fn list(t: &'static Shape) -> Self {
        Self {
            name: None,
            def: Def::List(ListDef { t }),
        }
    }

    /// An unnamed map from `k` to `v`.
    pub const fn map(k: &'static Shape, v: &'static Shape) -> Self {
        Self {
            name: None,
            def: Def::Map(MapDef { k, v }),
        }
    }

    /// An unnamed pointer to `pointee`.
    pub const fn pointer(pointee: &'static Shape) -> Self {
        Self {
            name: None,
            def: Def::Pointer(PointerDef { pointee }),
        }
    }

    /// An unnamed dynamic ("any") shape.
    pub const fn dynamic() -> Self {
        Self {
            name: None,
            def: Def::Dynamic,
        }
    }

    /// A named opaque shape.
    pub const fn opaque(name: &'static str) -> Self {
        Self {
            name: Some(name),
            def: Def::Opaque,
        }
    }

    /// Give this shape a name, turning it into a distinct defined type
    /// that shares its underlying definition.
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Type identity: the same static, or the same name over a structurally
    /// equal definition.
    pub fn is(&self, other: &Shape) -> bool {
        core::ptr::eq(self, other)
            || (self.name == other.name && self.def.same_structure(&other.def, true))
    }

    /// Returns true when both shapes have identical underlying definitions,
    /// ignoring their names and struct field tags.
    pub fn same_underlying(&self, other: &Shape) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        match (&self.def, &other.def) {
            // we cannot see what two opaque types are made of
            (Def::Opaque, Def::Opaque) => self.name == other.name,
            (a, b) => a.same_structure(b, false),
        }
    }

    /// Get the scalar type if this shape represents a scalar.
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        match self.def {
            Def::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// The struct definition, if this is a struct.
    pub const fn as_struct(&self) -> Option<&StructType> {
        match &self.def {
            Def::Struct(def) => Some(def),
            _ => None,
        }
    }

    /// The list definition, if this is a list.
    pub const fn as_list(&self) -> Option<&ListDef> {
        match &self.def {
            Def::List(def) => Some(def),
            _ => None,
        }
    }

    /// The map definition, if this is a map.
    pub const fn as_map(&self) -> Option<&MapDef> {
        match &self.def {
            Def::Map(def) => Some(def),
            _ => None,
        }
    }

    /// The pointer definition, if this is a pointer.
    pub const fn as_pointer(&self) -> Option<&PointerDef> {
        match &self.def {
            Def::Pointer(def) => Some(def),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name {
            return f.write_str(name);
        }
        match self.def {
            Def::Scalar(scalar) => f.write_str(scalar.type_name()),
            Def::Struct(def) => {
                f.write_str("struct {")?;
                for (i, field) in def.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, " {}: {}", field.name, field.shape)?;
                }
                f.write_str(" }")
            }
            Def::Map(def) => write!(f, "map[{}]{}", def.k, def.v),
            Def::List(def) => write!(f, "[]{}", def.t),
            Def::Pointer(def) => write!(f, "*{}", def.pointee),
            Def::Dynamic => f.write_str("any"),
            Def::Opaque => f.write_str("opaque"),
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for Shape {}

// Shapes can reference themselves through pointers, so Debug stays shallow.
impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({self})")
    }
}
