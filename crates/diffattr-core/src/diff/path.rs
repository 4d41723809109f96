use std::fmt;

use serde::{Serialize, Serializer};

/// Represents a single descent step within a difference path.
///
/// ```
/// # use diffattr_core::diff::PathSegment;
/// assert_eq!(PathSegment::index(2).to_string(), "[2]");
/// assert_eq!(PathSegment::key("name").to_string(), "[name]");
/// assert_eq!(PathSegment::field("attr").to_string(), ".attr");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Position within a list, tuple or set.
    Index(usize),
    /// Mapping key lookup.
    Key(String),
    /// Record field access.
    Field(String),
}

impl PathSegment {
    /// Creates an index segment.
    #[must_use]
    pub fn index(value: usize) -> Self {
        Self::Index(value)
    }

    /// Creates a key segment.
    #[must_use]
    pub fn key<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Key(value.into())
    }

    /// Creates a field segment.
    #[must_use]
    pub fn field<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Field(value.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "[{key}]"),
            Self::Field(name) => write!(f, ".{name}"),
        }
    }
}

/// Location of a difference relative to the comparison root.
///
/// The display form concatenates the segments without escaping; the root
/// renders as the empty string.
///
/// ```
/// # use diffattr_core::diff::{Path, PathSegment};
/// let path: Path = [PathSegment::key("key1"), PathSegment::index(2), PathSegment::field("name")]
///     .into_iter()
///     .collect();
/// assert_eq!(path.to_string(), "[key1][2].name");
/// assert_eq!(path, "[key1][2].name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates the root path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this path extended by `segment`.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }

    /// Returns the number of segments, which is the depth below the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether this is the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl PartialEq<str> for Path {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Path {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(Path::new().to_string(), "");
        assert_eq!(Path::new(), "");
    }

    #[test]
    fn keys_are_not_escaped() {
        let path: Path = [PathSegment::key("a]b"), PathSegment::field("x.y")].into_iter().collect();
        assert_eq!(path.to_string(), "[a]b].x.y");
        assert_eq!(path, "[a]b].x.y");
        assert_ne!(path, "[a]b].x");
    }

    #[test]
    fn serializes_as_display_string() {
        let path = Path::from(vec![PathSegment::key("foo"), PathSegment::index(3)]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"[foo][3]\"");
    }
}
