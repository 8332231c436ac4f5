//! Shapes for the builtin scalar types.

use crate::{ScalarType, Shape};

/// `bool`
pub static BOOL: Shape = Shape::scalar(ScalarType::Bool);
/// `i8`
pub static I8: Shape = Shape::scalar(ScalarType::I8);
/// `i16`
pub static I16: Shape = Shape::scalar(ScalarType::I16);
/// `i32`
pub static I32: Shape = Shape::scalar(ScalarType::I32);
/// `i64`
pub static I64: Shape = Shape::scalar(ScalarType::I64);
/// `u8`
pub static U8: Shape = Shape::scalar(ScalarType::U8);
/// `u16`
pub static U16: Shape = Shape::scalar(ScalarType::U16);
/// `u32`
pub static U32: Shape = Shape::scalar(ScalarType::U32);
/// `u64`
pub static U64: Shape = Shape::scalar(ScalarType::U64);
/// `f32`
pub static F32: Shape = Shape::scalar(ScalarType::F32);
/// `f64`
pub static F64: Shape = Shape::scalar(ScalarType::F64);
/// `Complex<f32>`
pub static COMPLEX64: Shape = Shape::scalar(ScalarType::Complex64);
/// `Complex<f64>`
pub static COMPLEX128: Shape = Shape::scalar(ScalarType::Complex128);
/// `String`
pub static STRING: Shape = Shape::scalar(ScalarType::String);
/// `Vec<u8>`, treated as a byte buffer rather than a list
pub static BYTES: Shape = Shape::scalar(ScalarType::Bytes);
/// A time instant
pub static TIME: Shape = Shape::scalar(ScalarType::Time);
/// Holds anything
pub static ANY: Shape = Shape::dynamic();

/// List of `u8`, the target of text-to-bytes sequence assignment
pub static U8_LIST: Shape = Shape::list(&U8);
/// List of `i32`, the target of text-to-characters sequence assignment
pub static I32_LIST: Shape = Shape::list(&I32);
