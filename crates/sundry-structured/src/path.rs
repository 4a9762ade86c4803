//! Slash-delimited paths for addressing a location inside a document.
//!
//! A path is a sequence of string segments. Segments are matched against map
//! keys, or parsed as base-10 (possibly negative) indices when the node being
//! walked is a list. The textual form escapes the separator inside a segment
//! the way RFC 6901 does: `~` is written `~0` and the separator `~1`, whatever
//! separator character is in use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator used by [`Path::parse`] and `Display`.
pub const DEFAULT_SEPARATOR: char = '/';

/// Segment that matches any key or index in glob filters.
pub const WILDCARD: &str = "*";

/// A location inside a document.
///
/// The empty path addresses the root. Paths are never mutated by the
/// combinators below; each returns a fresh copy.
///
/// # Examples
///
/// ```
/// use sundry_structured::Path;
///
/// let path = Path::parse("/users/0/name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "/users/0/name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    /// Create an empty path (root).
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty path (alias for `new`).
    #[inline]
    pub fn root() -> Self {
        Self::new()
    }

    /// Create a path from already-decoded segments.
    #[inline]
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parse a `/`-delimited string.
    pub fn parse(s: &str) -> Self {
        Self::parse_with(s, DEFAULT_SEPARATOR)
    }

    /// Parse a string delimited by `separator`.
    ///
    /// A single leading and a single trailing separator are ignored, so
    /// `"/a/b/"`, `"/a/b"` and `"a/b"` all yield `["a", "b"]`. The empty
    /// string and a lone separator both yield the root path.
    pub fn parse_with(s: &str, separator: char) -> Self {
        if s.is_empty() {
            return Self::root();
        }

        let mut raw: Vec<&str> = s.split(separator).collect();
        if raw.first().is_some_and(|first| first.is_empty()) {
            raw.remove(0);
        }
        if raw.last().is_some_and(|last| last.is_empty()) {
            raw.pop();
        }

        Self(
            raw.into_iter()
                .map(|seg| unescape_segment(seg, separator))
                .collect(),
        )
    }

    /// Format with a custom separator.
    ///
    /// The result always starts with the separator; the root path formats as
    /// a lone separator.
    pub fn format_with(&self, separator: char) -> String {
        if self.0.is_empty() {
            return separator.to_string();
        }
        let mut out = String::new();
        for seg in &self.0 {
            out.push(separator);
            out.push_str(&escape_segment(seg, separator));
        }
        out
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check if this path is empty (root).
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Iterate over the segments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Return a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Path {
        let mut result = Vec::with_capacity(self.0.len() + 1);
        result.extend(self.0.iter().cloned());
        result.push(segment.into());
        Path(result)
    }

    /// Return a new path with all segments of `other` appended.
    pub fn join(&self, other: &Path) -> Path {
        let mut result = Vec::with_capacity(self.0.len() + other.0.len());
        result.extend(self.0.iter().cloned());
        result.extend(other.0.iter().cloned());
        Path(result)
    }

    /// The first `len` segments as a new path.
    pub fn prefix(&self, len: usize) -> Path {
        Path(self.0[..len.min(self.0.len())].to_vec())
    }

    /// Get the parent path (path without the last segment).
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.prefix(self.0.len() - 1))
        }
    }

    /// Check if this path starts with `prefix`, segment by segment.
    ///
    /// ```
    /// use sundry_structured::path;
    ///
    /// assert!(path!("a", "b", "c").starts_with(&path!("a", "b")));
    /// assert!(!path!("a", "bc").starts_with(&path!("a", "b")));
    /// ```
    #[inline]
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Check if this path is a prefix of (or equal to) `other`.
    #[inline]
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.starts_with(self)
    }

    /// Longest prefix shared by both paths.
    pub fn common_root(&self, other: &Path) -> Path {
        let shared = self
            .0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count();
        self.prefix(shared)
    }

    /// Whether any segment is the `*` wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(|seg| seg == WILDCARD)
    }
}

/// Encode `~` and `separator` inside a single segment.
pub fn escape_segment(segment: &str, separator: char) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c == '~' {
            out.push_str("~0");
        } else if c == separator {
            out.push_str("~1");
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode `~1` to `separator` and `~0` to `~`. Any other `~` is kept as is.
pub fn unescape_segment(segment: &str, separator: char) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('1') => {
                chars.next();
                out.push(separator);
            }
            Some('0') => {
                chars.next();
                out.push('~');
            }
            _ => out.push('~'),
        }
    }
    out
}

/// Textual path format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathFormat {
    pub separator: char,
}

impl Default for PathFormat {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl PathFormat {
    pub fn with_separator(separator: char) -> Self {
        Self { separator }
    }

    pub fn parse(&self, s: &str) -> Path {
        Path::parse_with(s, self.separator)
    }

    pub fn format(&self, path: &Path) -> String {
        path.format_with(self.separator)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DEFAULT_SEPARATOR))
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

/// Parses the string with the default separator.
impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

/// Parses the string with the default separator.
impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path(segments)
    }
}

impl FromIterator<String> for Path {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.0[index].as_str()
    }
}

/// Construct a [`Path`] from segments, without any parsing or unescaping.
///
/// Anything implementing `ToString` is accepted, so indices can be given as
/// numbers.
///
/// ```
/// use sundry_structured::path;
///
/// let p = path!("items", 0, "a/b");
/// assert_eq!(p.to_string(), "/items/0/a~1b");
/// assert!(path!().is_root());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($seg:expr),+ $(,)?) => {
        $crate::Path::from_segments(vec![$(::std::string::ToString::to_string(&$seg)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_boundary_separators() {
        assert_eq!(Path::parse("/a/b"), path!("a", "b"));
        assert_eq!(Path::parse("a/b"), path!("a", "b"));
        assert_eq!(Path::parse("/a/b/"), path!("a", "b"));
        assert_eq!(Path::parse("/a//b"), path!("a", "", "b"));
    }

    #[test]
    fn test_parse_root_forms() {
        assert!(Path::parse("").is_root());
        assert!(Path::parse("/").is_root());
        assert_eq!(Path::parse("//"), path!(""));
    }

    #[test]
    fn test_escaping() {
        let p = path!("a/b", "c~d");
        assert_eq!(p.to_string(), "/a~1b/c~0d");
        assert_eq!(Path::parse("/a~1b/c~0d"), p);
        // ~01 decodes to "~1", not to a separator
        assert_eq!(Path::parse("/~01"), path!("~1"));
        // dangling tilde is kept
        assert_eq!(Path::parse("/a~"), path!("a~"));
    }

    #[test]
    fn test_custom_separator() {
        let format = PathFormat::with_separator('.');
        let p = format.parse("spec.template.a~1b");
        assert_eq!(p, path!("spec", "template", "a.b"));
        assert_eq!(format.format(&p), ".spec.template.a~1b");
        // slashes are ordinary characters under a custom separator
        assert_eq!(format.parse("a/b.c"), path!("a/b", "c"));
    }

    #[test]
    fn test_round_trip() {
        let paths = vec![
            path!("a"),
            path!("a", "b", "0"),
            path!("with/slash", "with~tilde", "~1"),
            path!("a", "", "b"),
            Path::root(),
        ];
        for p in paths {
            assert_eq!(Path::parse(&p.to_string()), p, "round trip of {p:?}");
        }
    }

    #[test]
    fn test_child_does_not_mutate() {
        let base = Path::parse("/a");
        let c1 = base.child("b");
        let c2 = base.child("c");
        assert_eq!(base, path!("a"));
        assert_eq!(c1, path!("a", "b"));
        assert_eq!(c2, path!("a", "c"));
    }

    #[test]
    fn test_prefix_relations() {
        let p = path!("a", "b", "c");
        assert!(p.starts_with(&path!("a", "b")));
        assert!(p.starts_with(&Path::root()));
        assert!(path!("a").is_prefix_of(&p));
        assert!(!p.is_prefix_of(&path!("a")));
        // no normalization
        assert!(!path!("a", ".", "b").starts_with(&path!("a", "b")));
    }

    #[test]
    fn test_common_root() {
        let a = path!("x", "y", "z");
        let b = path!("x", "y", "w");
        assert_eq!(a.common_root(&b), path!("x", "y"));
        assert!(a.common_root(&path!("q")).is_root());
    }

    #[test]
    fn test_parent_and_wildcard() {
        assert_eq!(path!("a", "b").parent(), Some(path!("a")));
        assert_eq!(Path::root().parent(), None);
        assert!(path!("a", "*").has_wildcard());
        assert!(!path!("a", "b*").has_wildcard());
    }

    #[test]
    fn test_path_serde() {
        let p = path!("a", "b");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
