//! The coercion engine: one rule table keyed by destination and source
//! category.

use num_complex::{Complex, Complex64};
use recast_core::{Heap, Place, Repr, ScalarType, Shape, ShapeCategory, Value};

use crate::{
    Options, ReflectError, assign_value, convert_value, copy_map, copy_slice, parse_time, trace,
};

const TRUE_LITERALS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];
const FALSE_LITERALS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];

fn parse_bool(text: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&text) {
        Some(true)
    } else if FALSE_LITERALS.contains(&text) {
        Some(false)
    } else {
        None
    }
}

fn bytes_text(bytes: &[u8]) -> Option<&str> {
    core::str::from_utf8(bytes).ok()
}

/// Coerce `src` into the value at `dest`, with default [`Options`].
pub fn assign(heap: &mut Heap, dest: &Place, src: &Value) -> Result<bool, ReflectError> {
    assign_with(heap, dest, src, &Options::default())
}

/// Coerce `src` into the value at `dest`.
///
/// Returns `Ok(false)`, leaving the destination untouched, when no rule
/// applies. A list destination fed a list source is handed to
/// [`copy_slice`] with `overwrite` set.
pub fn assign_with(
    heap: &mut Heap,
    dest: &Place,
    src: &Value,
    opts: &Options,
) -> Result<bool, ReflectError> {
    let shape = heap
        .place(dest)
        .ok_or(ReflectError::DanglingSlot { slot: dest.slot })?
        .shape();

    let held = src.as_dynamic().unwrap_or(src);
    if shape.category() == ShapeCategory::Sequence
        && held.shape().category() == ShapeCategory::Sequence
    {
        copy_slice(heap, dest, held, true)?;
        return Ok(true);
    }

    match coerce(heap, shape, src, opts)? {
        Some(value) => {
            trace!("assigned {} to {}", src.shape(), shape);
            *heap
                .place_mut(dest)
                .ok_or(ReflectError::DanglingSlot { slot: dest.slot })? = value;
            Ok(true)
        }
        None => {
            trace!("no rule assigns {} to {}", src.shape(), shape);
            Ok(false)
        }
    }
}

/// Like [`assign_with`], but a map destination goes to [`copy_map`] with
/// `overwrite` set, whatever the source is.
///
/// Dynamic sources holding a list or map are copied as what they hold.
pub fn populate(
    heap: &mut Heap,
    dest: &Place,
    src: &Value,
    opts: &Options,
) -> Result<bool, ReflectError> {
    let shape = heap
        .place(dest)
        .ok_or(ReflectError::DanglingSlot { slot: dest.slot })?
        .shape();
    if shape.category() == ShapeCategory::Map {
        copy_map(heap, dest, src, true)?;
        return Ok(true);
    }
    assign_with(heap, dest, src, opts)
}

/// Compute the value of shape `dest` that `src` coerces to, without writing
/// it anywhere. `Ok(None)` when no rule applies.
///
/// Non-empty bytes fed to a complex destination are decoded as JSON, and
/// bytes that do not decode fail with [`ReflectError::Decode`] rather than
/// `Ok(None)`.
///
/// The heap is needed to format reference-typed sources as text and to
/// allocate lists built from text.
pub fn coerce(
    heap: &mut Heap,
    dest: &'static Shape,
    src: &Value,
    opts: &Options,
) -> Result<Option<Value>, ReflectError> {
    if dest.category() == ShapeCategory::Dynamic {
        let repr = match src.repr() {
            Repr::Dynamic(inner) => Repr::Dynamic(inner.clone()),
            _ => Repr::Dynamic(Some(Box::new(src.clone()))),
        };
        return Ok(Value::new(dest, repr));
    }

    // dynamic sources are matched by what they hold
    let src = src.as_dynamic().unwrap_or(src);
    let make = |repr: Option<Repr>| repr.and_then(|repr| Value::new(dest, repr));

    let value = match dest.category() {
        ShapeCategory::Bool => make(match src.repr() {
            Repr::Bool(b) => Some(*b),
            Repr::Bytes(bytes) => bytes.first().map(|b| *b != 0),
            Repr::Int(i) => Some(*i != 0),
            Repr::Uint(u) => Some(*u != 0),
            Repr::String(s) => parse_bool(s),
            _ => None,
        }
        .map(Repr::Bool)),

        ShapeCategory::Text => {
            let text = match src.repr() {
                Repr::String(s) => s.clone(),
                Repr::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                _ => heap.display(src).to_string(),
            };
            make(Some(Repr::String(text)))
        }

        ShapeCategory::Signed => make(match src.repr() {
            Repr::Int(i) => Some(*i),
            Repr::Uint(u) => Some(*u as i64),
            Repr::String(s) => s.parse::<i64>().ok(),
            Repr::Bytes(bytes) => bytes_text(bytes).and_then(|s| s.parse::<i64>().ok()),
            _ => None,
        }
        .map(Repr::Int)),

        ShapeCategory::Unsigned => make(match src.repr() {
            Repr::Uint(u) => Some(*u),
            Repr::Int(i) => Some(*i as u64),
            Repr::String(s) => s.parse::<u64>().ok(),
            Repr::Bytes(bytes) => bytes_text(bytes).and_then(|s| s.parse::<u64>().ok()),
            _ => None,
        }
        .map(Repr::Uint)),

        ShapeCategory::Float => make(match src.repr() {
            Repr::Float(x) => Some(*x),
            Repr::String(s) => s.parse::<f64>().ok(),
            Repr::Bytes(bytes) => bytes_text(bytes).and_then(|s| s.parse::<f64>().ok()),
            _ => None,
        }
        .map(Repr::Float)),

        ShapeCategory::Complex => match src.repr() {
            Repr::Complex(c) => make(Some(Repr::Complex(*c))),
            Repr::Bytes(bytes) if !bytes.is_empty() => {
                make(Some(Repr::Complex(decode_complex(dest, bytes)?)))
            }
            _ => None,
        },

        ShapeCategory::Time => match src.repr() {
            Repr::Time(t) => make(Some(Repr::Time(*t))),
            Repr::Int(secs)
                if matches!(
                    src.shape().scalar_type(),
                    Some(ScalarType::I32 | ScalarType::I64)
                ) =>
            {
                make(opts.zone.from_unix(*secs).map(Repr::Time))
            }
            Repr::String(s) => make(Some(Repr::Time(parse_time(s.as_bytes(), opts.zone)))),
            Repr::Bytes(bytes) => make(Some(Repr::Time(parse_time(bytes, opts.zone)))),
            _ => convert_value(src, dest),
        },

        ShapeCategory::Struct => convert_value(src, dest),

        ShapeCategory::Pointer => match src.shape().category() {
            ShapeCategory::Pointer => convert_value(src, dest),
            _ => None,
        },

        ShapeCategory::Bytes => make(match src.repr() {
            Repr::Bytes(bytes) => Some(Repr::Bytes(bytes.clone())),
            Repr::String(s) => Some(Repr::Bytes(s.as_bytes().to_vec())),
            _ => None,
        }),

        ShapeCategory::Sequence => match src.repr() {
            Repr::String(s) => list_from_text(heap, dest, s.as_bytes(), Some(s)),
            Repr::Bytes(bytes) => list_from_text(heap, dest, bytes, None),
            _ if src.shape().category() == ShapeCategory::Sequence => convert_value(src, dest),
            _ => None,
        },

        ShapeCategory::Map => None,

        ShapeCategory::Unsupported => assign_value(src, dest),

        ShapeCategory::Dynamic => None,
    };
    Ok(value)
}

fn decode_complex(dest: &'static Shape, bytes: &[u8]) -> Result<Complex64, ReflectError> {
    let decoded = match dest.scalar_type() {
        Some(ScalarType::Complex64) => serde_json::from_slice::<Complex<f32>>(bytes)
            .map(|c| Complex64::new(c.re.into(), c.im.into())),
        _ => serde_json::from_slice::<Complex64>(bytes),
    };
    decoded.map_err(|err| ReflectError::Decode {
        shape: dest,
        message: err.to_string(),
    })
}

/// A new list of the bytes (`u8` elements) or characters (`i32` elements)
/// of some text.
fn list_from_text(
    heap: &mut Heap,
    dest: &'static Shape,
    bytes: &[u8],
    text: Option<&str>,
) -> Option<Value> {
    let elem = dest.as_list()?.t;
    let items: Vec<Value> = match (elem.scalar_type()?, text) {
        (ScalarType::U8, _) => bytes
            .iter()
            .map(|b| Value::from_parts(elem, Repr::Uint(u64::from(*b))))
            .collect(),
        (ScalarType::I32, Some(text)) => text
            .chars()
            .map(|c| Value::from_parts(elem, Repr::Int(i64::from(u32::from(c)))))
            .collect(),
        _ => return None,
    };
    heap.new_list(dest, items)
}
