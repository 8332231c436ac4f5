use recast_core::{Shape, SlotId};
use recast_path::PathError;

/// Errors that can occur when coercing, copying or populating values.
#[derive(Debug, Clone, PartialEq)]
pub enum ReflectError {
    /// Resolving a field path failed.
    Path(PathError),

    /// The destination is not a pointer.
    NotAPointer {
        /// Shape of the offending value.
        shape: &'static Shape,
    },

    /// The destination is a nil pointer.
    NilPointer {
        /// Shape of the offending value.
        shape: &'static Shape,
    },

    /// An operation that expects one kind of collection got something else.
    WasNotA {
        /// What was expected, e.g. `"map"`.
        expected: &'static str,
        /// What was found.
        actual: &'static Shape,
    },

    /// Source and destination maps have different key types.
    KeyTypeMismatch {
        /// Key type of the destination.
        expected: &'static Shape,
        /// Key type of the source.
        actual: &'static Shape,
    },

    /// No coercion rule assigns the source to the destination.
    NotAssigned {
        /// Shape of the destination.
        dest: &'static Shape,
        /// Shape of the source.
        src: &'static Shape,
    },

    /// Structured bytes could not be decoded into the destination type.
    Decode {
        /// Shape being decoded into.
        shape: &'static Shape,
        /// What the decoder reported.
        message: String,
    },

    /// A value references a slot the heap does not have.
    DanglingSlot {
        /// The missing slot.
        slot: SlotId,
    },
}

impl From<PathError> for ReflectError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NotAPointer { shape } => ReflectError::NotAPointer { shape },
            PathError::NilPointer { shape } => ReflectError::NilPointer { shape },
            PathError::DanglingSlot { slot } => ReflectError::DanglingSlot { slot },
            err => ReflectError::Path(err),
        }
    }
}

impl core::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectError::Path(err) => write!(f, "{err}"),
            ReflectError::NotAPointer { shape } => write!(f, "object is not a pointer: {shape}"),
            ReflectError::NilPointer { shape } => write!(f, "nil object: {shape}"),
            ReflectError::WasNotA { expected, actual } => {
                write!(f, "was not a {expected}: {actual}")
            }
            ReflectError::KeyTypeMismatch { expected, actual } => write!(
                f,
                "map key type mismatch: expected {expected}, got {actual}"
            ),
            ReflectError::NotAssigned { dest, src } => write!(f, "cannot assign {src} to {dest}"),
            ReflectError::Decode { shape, message } => {
                write!(f, "cannot decode {shape} from bytes: {message}")
            }
            ReflectError::DanglingSlot { slot } => write!(f, "slot {slot} is not in this heap"),
        }
    }
}

impl core::error::Error for ReflectError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ReflectError::Path(err) => Some(err),
            _ => None,
        }
    }
}
