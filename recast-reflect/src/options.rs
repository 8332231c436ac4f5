use std::borrow::Cow;

use recast_path::{DEFAULT_DELIMITER, FieldMatcher};

use crate::Zone;

/// Knobs shared by the path-based and handle-based operations.
///
/// ```
/// use recast_reflect::{Options, Zone};
///
/// let opts = Options::default().tag("column").delimiter('/').zone(Zone::Utc);
/// assert_eq!(opts.delimiter, '/');
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Separator between path segments.
    pub delimiter: char,
    /// How segments and field names pick struct fields.
    pub matcher: FieldMatcher,
    /// Zone for epoch seconds and zone-less time strings.
    pub zone: Zone,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            matcher: FieldMatcher::Name,
            zone: Zone::Local,
        }
    }
}

impl Options {
    /// Set the path separator.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the field matcher.
    pub fn matcher(mut self, matcher: FieldMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Match fields by the tag stored under `key`.
    pub fn tag(self, key: impl Into<Cow<'static, str>>) -> Self {
        self.matcher(FieldMatcher::Tag(key.into()))
    }

    /// Set the time zone.
    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }
}
