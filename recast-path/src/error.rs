use recast_core::{Shape, SlotId};

/// Errors that can occur when resolving a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The root is not a pointer.
    NotAPointer {
        /// Shape of the root.
        shape: &'static Shape,
    },

    /// The root is a nil pointer.
    NilPointer {
        /// Shape of the root.
        shape: &'static Shape,
    },

    /// The path has no segments.
    EmptyPath,

    /// No field of the current struct matches a segment.
    FieldNotFound {
        /// The unmatched segment.
        segment: String,
        /// The full path being resolved.
        path: String,
    },

    /// A segment tried to descend into something that is not a struct.
    NotAStruct {
        /// The segment that could not be resolved.
        segment: String,
        /// The full path being resolved.
        path: String,
        /// What was found instead of a struct.
        shape: &'static Shape,
    },

    /// A value references a slot the heap does not have.
    DanglingSlot {
        /// The missing slot.
        slot: SlotId,
    },
}

impl core::fmt::Display for PathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PathError::NotAPointer { shape } => write!(f, "object is not a pointer: {shape}"),
            PathError::NilPointer { shape } => write!(f, "nil object: {shape}"),
            PathError::EmptyPath => write!(f, "path is empty"),
            PathError::FieldNotFound { segment, path } => {
                write!(f, "field not found: segment `{segment}` in path `{path}`")
            }
            PathError::NotAStruct {
                segment,
                path,
                shape,
            } => write!(
                f,
                "cannot resolve segment `{segment}` of path `{path}`: {shape} is not a struct"
            ),
            PathError::DanglingSlot { slot } => write!(f, "slot {slot} is not in this heap"),
        }
    }
}

impl core::error::Error for PathError {}
