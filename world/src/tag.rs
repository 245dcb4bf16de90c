use std::fmt;

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};
use util::InString;

/// Label marking membership in a loose category, such as "adds to the
/// forest biome" or "counts as a bed for room recipes".
///
/// Objects may carry any number of tags. The empty tag is `Tag::NONE`.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Deref,
    From,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Tag(InString);

impl Tag {
    pub const NONE: Tag = Tag(InString::EMPTY);

    pub fn new(s: impl AsRef<str>) -> Self {
        Tag(InString::new(s))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::new(value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tags() {
        assert!(Tag::NONE.is_none());
        assert_eq!(Tag::default(), Tag::NONE);
        assert_eq!(Tag::new("bed"), Tag::from("bed"));
        assert!(Tag::new("bed") < Tag::new("chair"));
        assert!(Tag::NONE < Tag::new("a"));
        assert_eq!(Tag::new("stove").as_str(), "stove");
        assert_eq!(&**Tag::new("stove"), "stove");
    }

    #[test]
    fn serializes_as_string() {
        let tag = Tag::new("workbench");
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#""workbench""#);
        assert_eq!(serde_json::from_str::<Tag>(&json).unwrap(), tag);
    }
}
