#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! Populate typed structures from loosely typed values.
//!
//! This crate re-exports [`recast_core`] (shapes, values and the heap),
//! [`recast_path`] (field paths and matchers) and [`recast_reflect`] (the
//! coercion engine, collection copies and object handles).
//!
//! ```
//! use recast::{Heap, Shape, Value, builtins, get_object_info};
//!
//! static SCORES: Shape = Shape::map(&builtins::STRING, &builtins::F64);
//! static SCORES_PTR: Shape = Shape::pointer(&SCORES);
//!
//! let mut heap = Heap::new();
//! let scores = heap.new_pointer(&SCORES_PTR, Value::zero(&SCORES)).unwrap();
//! let handle = get_object_info(&heap, &scores).unwrap();
//! assert!(handle.set_field(&mut heap, "alice", &Value::from(9.5f32)).unwrap());
//!
//! let map = heap.deref(&scores).unwrap();
//! assert_eq!(heap.display(map).to_string(), "map[alice:9.5]");
//! ```

pub use recast_core::*;
pub use recast_path::*;
pub use recast_reflect::*;
