//! How one path segment picks a struct field.

use std::borrow::Cow;

use recast_core::{Field, StructType};

/// Strategy for matching a path segment against struct fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FieldMatcher {
    /// The literal field name, case-sensitive.
    #[default]
    Name,

    /// The value of the tag stored under this key, instead of the name.
    /// Fields without that tag never match.
    Tag(Cow<'static, str>),

    /// The literal name first; failing that, the tag under this key.
    NameOrTag(Cow<'static, str>),

    /// The literal name first; failing that, the name compared ignoring
    /// ASCII case.
    NameIgnoreCase,
}

impl FieldMatcher {
    /// Match on the tag stored under `key`.
    pub fn tag(key: impl Into<Cow<'static, str>>) -> Self {
        FieldMatcher::Tag(key.into())
    }

    /// Match on the name, then on the tag stored under `key`.
    pub fn name_or_tag(key: impl Into<Cow<'static, str>>) -> Self {
        FieldMatcher::NameOrTag(key.into())
    }

    /// Index of the field `segment` selects in `def`.
    pub fn find(&self, def: &StructType, segment: &str) -> Option<usize> {
        let by_name = || def.fields.iter().position(|f| f.name == segment);
        let by_tag = |key: &str| {
            def.fields
                .iter()
                .position(|f| tag_matches(f, key, segment))
        };
        match self {
            FieldMatcher::Name => by_name(),
            FieldMatcher::Tag(key) => by_tag(key),
            FieldMatcher::NameOrTag(key) => by_name().or_else(|| by_tag(key)),
            FieldMatcher::NameIgnoreCase => by_name().or_else(|| {
                def.fields
                    .iter()
                    .position(|f| f.name.eq_ignore_ascii_case(segment))
            }),
        }
    }
}

fn tag_matches(field: &Field, key: &str, segment: &str) -> bool {
    field.tag(key) == Some(segment)
}

impl core::fmt::Display for FieldMatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldMatcher::Name => f.write_str("field name"),
            FieldMatcher::Tag(key) => write!(f, "`{key}` tag"),
            FieldMatcher::NameOrTag(key) => write!(f, "field name or `{key}` tag"),
            FieldMatcher::NameIgnoreCase => f.write_str("field name ignoring case"),
        }
    }
}
