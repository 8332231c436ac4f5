#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
//! Runtime type descriptors and dynamic values for the recast engine.
//!
//! Types are described by [`Shape`]s declared in static space. Values are
//! [`Value`]s: a shape paired with a matching [`Repr`] payload. Everything
//! reference-typed (pointees, list and map backings) lives in a [`Heap`] of
//! slots, so cloning a pointer, list or map value aliases its storage.

mod shape;
pub use shape::*;

pub mod builtins;

mod category;
pub use category::*;

mod value;
pub use value::*;

mod heap;
pub use heap::*;

mod format;
pub use format::*;

pub use chrono;
pub use indexmap;
pub use num_complex;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
