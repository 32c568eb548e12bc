//! Path tokenization.
//!
//! Splits a `/`-separated path into its non-empty segments. Whether the path
//! is absolute is reported beside the segments rather than as a segment of its
//! own. `.` and `..` come through untouched; [`Segment`] classifies them for
//! callers that navigate.

/// A tokenized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegments<'a> {
    /// True when the input started with `/`.
    pub absolute: bool,
    /// Non-empty segments, left to right.
    pub segments: Vec<&'a str>,
}

impl PathSegments<'_> {
    /// True when the path had no segments (`""`, `"/"`, `"///"`).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Tokenize a path string.
pub fn tokenize(path: &str) -> PathSegments<'_> {
    PathSegments {
        absolute: path.starts_with('/'),
        segments: path.split('/').filter(|s| !s.is_empty()).collect(),
    }
}

/// Navigational meaning of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `.`
    Current,
    /// `..`
    Parent,
    /// Anything else: a child name matched by exact string equality.
    Name(&'a str),
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(segment: &'a str) -> Self {
        match segment {
            "." => Segment::Current,
            ".." => Segment::Parent,
            name => Segment::Name(name),
        }
    }
}
