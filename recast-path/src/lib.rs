#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
//! Field paths over recast values.
//!
//! A path is a string of segments such as `"B.C.Field"`. Each segment picks
//! a field of the current struct, by name or by tag depending on the
//! [`FieldMatcher`], and [`resolve_field`] turns the whole path into a
//! [`Place`](recast_core::Place) that can be written to.

mod error;
pub use error::PathError;

mod matcher;
pub use matcher::FieldMatcher;

mod resolve;
pub use resolve::{DEFAULT_DELIMITER, resolve_field};

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
