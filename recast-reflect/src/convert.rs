//! Assignability and convertibility between shapes, and the conversions
//! themselves.

use recast_core::{Def, Repr, ScalarType, Shape, Value};

/// Returns true when a value of `src` can be stored in `dest` as-is: the
/// same type, or a dynamic destination.
pub fn assignable_to(src: &Shape, dest: &Shape) -> bool {
    src.is(dest) || matches!(dest.def, Def::Dynamic)
}

/// Returns true when a value of `src` can be converted to `dest`.
///
/// Besides assignable pairs this covers types sharing an underlying
/// definition, numeric to numeric, complex to complex, text to and from
/// bytes, and time to time. Integers do not convert to text.
pub fn convertible_to(src: &Shape, dest: &Shape) -> bool {
    if assignable_to(src, dest) || src.same_underlying(dest) {
        return true;
    }
    match (src.scalar_type(), dest.scalar_type()) {
        (Some(a), Some(b)) => {
            (is_numeric(a) && is_numeric(b))
                || (a.is_complex() && b.is_complex())
                || matches!(
                    (a, b),
                    (ScalarType::String, ScalarType::Bytes)
                        | (ScalarType::Bytes, ScalarType::String)
                        | (ScalarType::Time, ScalarType::Time)
                )
        }
        _ => false,
    }
}

fn is_numeric(scalar: ScalarType) -> bool {
    scalar.is_signed() || scalar.is_unsigned() || scalar.is_float()
}

/// `value` as a value of `dest`, if it is assignable there. Dynamic
/// destinations wrap it.
pub fn assign_value(value: &Value, dest: &'static Shape) -> Option<Value> {
    if value.shape().is(dest) {
        return Some(value.clone());
    }
    match dest.def {
        Def::Dynamic => Value::new(dest, Repr::Dynamic(Some(Box::new(value.clone())))),
        _ => None,
    }
}

/// `value` converted to `dest`, if it is convertible there.
///
/// Integers wrap to the destination width and floats truncate toward zero.
pub fn convert_value(value: &Value, dest: &'static Shape) -> Option<Value> {
    if let Some(assigned) = assign_value(value, dest) {
        return Some(assigned);
    }
    if value.shape().same_underlying(dest) {
        return value.clone().with_shape(dest);
    }

    let target = dest.scalar_type()?;
    let repr = match value.repr() {
        Repr::Int(i) if target.is_signed() => Repr::Int(*i),
        Repr::Int(i) if target.is_unsigned() => Repr::Uint(*i as u64),
        Repr::Int(i) if target.is_float() => Repr::Float(*i as f64),
        Repr::Uint(u) if target.is_signed() => Repr::Int(*u as i64),
        Repr::Uint(u) if target.is_unsigned() => Repr::Uint(*u),
        Repr::Uint(u) if target.is_float() => Repr::Float(*u as f64),
        Repr::Float(x) if target.is_signed() => Repr::Int(*x as i64),
        Repr::Float(x) if target.is_unsigned() => Repr::Uint(*x as u64),
        Repr::Float(x) if target.is_float() => Repr::Float(*x),
        Repr::Complex(c) if target.is_complex() => Repr::Complex(*c),
        Repr::Bytes(b) if target == ScalarType::String => {
            Repr::String(String::from_utf8_lossy(b).into_owned())
        }
        Repr::String(s) if target == ScalarType::Bytes => Repr::Bytes(s.as_bytes().to_vec()),
        Repr::Time(t) if target == ScalarType::Time => Repr::Time(*t),
        _ => return None,
    };
    Value::new(dest, repr)
}
