use core::fmt::{self, Display, Write};

use crate::{Heap, Repr, ScalarType, Value};

/// A value formatted the way Go's `%v` verb would print it.
///
/// Structs print as `{a b}`, lists as `[a b]`, maps as `map[k:v]`, a pointer
/// at the top level as `&` followed by its pointee, nil references as
/// `<nil>`.
pub struct FormattedValue<'a> {
    heap: &'a Heap,
    value: &'a Value,
}

impl<'a> FormattedValue<'a> {
    /// Format `value`, reading references from `heap`.
    pub fn new(heap: &'a Heap, value: &'a Value) -> Self {
        Self { heap, value }
    }

    fn write_value(&self, f: &mut fmt::Formatter<'_>, value: &Value, depth: usize) -> fmt::Result {
        match value.repr() {
            Repr::Bool(v) => write!(f, "{v}"),
            Repr::Int(v) => write!(f, "{v}"),
            Repr::Uint(v) => write!(f, "{v}"),
            Repr::Float(v) => write_float(f, *v, value.shape().scalar_type()),
            Repr::Complex(c) => {
                let scalar = match value.shape().scalar_type() {
                    Some(ScalarType::Complex64) => Some(ScalarType::F32),
                    _ => Some(ScalarType::F64),
                };
                f.write_char('(')?;
                write_float(f, c.re, scalar)?;
                if c.im >= 0.0 || c.im.is_nan() {
                    f.write_char('+')?;
                }
                write_float(f, c.im, scalar)?;
                f.write_str("i)")
            }
            Repr::String(v) => f.write_str(v),
            Repr::Bytes(bytes) => {
                f.write_char('[')?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{b}")?;
                }
                f.write_char(']')
            }
            Repr::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.f %z")),
            Repr::Struct(fields) => {
                f.write_char('{')?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    self.write_value(f, field, depth + 1)?;
                }
                f.write_char('}')
            }
            Repr::Pointer(None) | Repr::Dynamic(None) | Repr::Opaque(None) => f.write_str("<nil>"),
            Repr::Pointer(Some(slot)) => {
                if depth > 0 {
                    return write!(f, "{slot}");
                }
                match self.heap.value(*slot) {
                    Some(pointee) => {
                        f.write_char('&')?;
                        self.write_value(f, pointee, depth + 1)
                    }
                    None => f.write_str("<dangling>"),
                }
            }
            Repr::List(None) => f.write_str("[]"),
            Repr::List(Some(slot)) => {
                let Some(items) = self.heap.list(*slot) else {
                    return f.write_str("<dangling>");
                };
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    self.write_value(f, item, depth + 1)?;
                }
                f.write_char(']')
            }
            Repr::Map(None) => f.write_str("map[]"),
            Repr::Map(Some(slot)) => {
                let Some(entries) = self.heap.map(*slot) else {
                    return f.write_str("<dangling>");
                };
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    self.write_value(f, k, depth + 1)?;
                    f.write_char(':')?;
                    self.write_value(f, v, depth + 1)?;
                }
                f.write_char(']')
            }
            Repr::Dynamic(Some(inner)) => self.write_value(f, inner, depth),
            Repr::Opaque(Some(handle)) => write!(f, "{handle:p}"),
        }
    }
}

/// Shortest text that reads back as the same float of the given precision.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64, scalar: Option<ScalarType>) -> fmt::Result {
    match scalar {
        Some(ScalarType::F32) => write!(f, "{}", value as f32),
        _ => write!(f, "{value}"),
    }
}

impl Display for FormattedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_value(f, self.value, 0)
    }
}
