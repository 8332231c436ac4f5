#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
//! Best-effort coercion of dynamic values into typed destinations.
//!
//! Given a destination (a struct field picked by a dotted path, a map entry,
//! a list item, or the whole value behind a pointer) and a source of a
//! possibly different but related type, the engine decides whether and how
//! to convert the source and writes the result:
//!
//! ```
//! use recast_core::{Field, Heap, Shape, Value, builtins};
//! use recast_reflect::set_struct_field_value_by_tag;
//!
//! static USER: Shape = Shape::structure(
//!     "User",
//!     &[
//!         Field::new("Id", &builtins::I64).tags(&[("column", "id")]),
//!         Field::new("Active", &builtins::BOOL).tags(&[("column", "active")]),
//!     ],
//! );
//! static USER_PTR: Shape = Shape::pointer(&USER);
//!
//! let mut heap = Heap::new();
//! let user = heap.new_pointer(&USER_PTR, Value::zero(&USER)).unwrap();
//! set_struct_field_value_by_tag(&mut heap, &user, "id", &Value::from("42"), "column").unwrap();
//! set_struct_field_value_by_tag(&mut heap, &user, "active", &Value::from(1u8), "column").unwrap();
//!
//! let row = heap.deref(&user).unwrap();
//! assert_eq!(row.field("Id"), Some(&Value::from(42i64)));
//! assert_eq!(row.field("Active"), Some(&Value::from(true)));
//! ```

mod error;
pub use error::*;

mod options;
pub use options::*;

mod time;
pub use time::*;

mod convert;
pub use convert::*;

mod coerce;
pub use coerce::*;

mod copy;
pub use copy::{copy_map, copy_slice};

mod handle;
pub use handle::*;

mod api;
pub use api::*;

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
