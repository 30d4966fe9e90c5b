/*!
A path is always defined for a URI, though the defined path may be empty (zero length). A
segment may also be empty, resulting in two consecutive slashes (//) in the path component. If
an authority component is present, then the path component must either be empty or begin with a
slash (/). The final segment of the path may be referred to as a 'slug'.
*/

#![allow(clippy::module_name_repetitions)]

use crate::error::{Component, Error as IriError, ErrorKind, Result as IriResult};
use crate::Normalize;
use crate::{parse, ValidateStr};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The path component of a `UriView`.
///
/// ```rust
/// use loomrdf_iri::Path;
/// use std::str::FromStr;
///
/// let path = Path::from_str("foo").unwrap();
/// assert_eq!(path.to_string(), "foo");
///
/// let path = Path::from_str("/foo/bar").unwrap();
/// assert_eq!(path.to_string(), "/foo/bar");
/// ```
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path(String);

///
/// An aid used while relativizing a `UriView` against a base path. Either a literal string to
/// prepend to the serialized reference, or a count of `"../"` up-references to synthesize.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PathPrefix {
    #[default]
    None,
    UpReferences(usize),
    Literal(String),
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

const PATH_SEP: &str = "/";
const PATH_SEP_CHAR: char = '/';
const DOT: &str = ".";
const DOT_DOT: &str = "..";
const WELL_KNOWN: &str = "/.well-known/";

impl Default for Path {
    fn default() -> Self {
        Self(String::new())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Path {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ErrorKind::InvalidChar(Component::Path).into())
        }
    }
}

impl ValidateStr for Path {
    fn is_valid(s: &str) -> bool {
        parse::is_path(s)
    }
}

impl Normalize for Path {
    // SPEC: RFC-3986 §5.2.4, "Remove Dot Segments".
    fn normalize(self) -> IriResult<Self> {
        let absolute = self.is_absolute();
        let trailing_slash = self.0.len() > 1 && self.0.ends_with(PATH_SEP);
        let segments: Vec<&str> = self.0.split(PATH_SEP_CHAR).filter(|s| !s.is_empty()).collect();
        let mut out: Vec<&str> = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment == DOT {
                continue;
            } else if segment == DOT_DOT {
                if out.pop().is_none() && !absolute {
                    out.push(DOT_DOT);
                }
            } else {
                out.push(segment);
            }
        }
        let mut result = String::new();
        if absolute {
            result.push(PATH_SEP_CHAR);
        }
        result.push_str(&out.join(PATH_SEP));
        if trailing_slash && !result.ends_with(PATH_SEP_CHAR) {
            result.push(PATH_SEP_CHAR);
        }
        Ok(Self(result))
    }
}

impl Path {
    /// The root of a path is the path separator character "/", this will return a new path
    /// consisting of only this character.
    pub fn root() -> Self {
        Self(PATH_SEP.to_string())
    }

    /// Constructs a path from an already-encoded string without validating it against the
    /// generic URI path grammar. Used by the file-URI constructor, whose double-percent escape
    /// sentinel is not representable in RFC 3986's `pct-encoded` production.
    pub(crate) fn new_unchecked<S>(s: S) -> Self
    where
        S: Into<String>,
    {
        Self(s.into())
    }

    /// Constructs a new *well-known* path per
    /// [RFC-8615](https://datatracker.ietf.org/doc/html/rfc8615).
    pub fn well_known() -> Self {
        Self(WELL_KNOWN.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with(PATH_SEP)
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn ends_with_slash(&self) -> bool {
        self.0.ends_with(PATH_SEP)
    }

    /// Resolve a path reference against `self` as the base path (RFC-3986 §5.2.2/§5.2.3).
    pub fn resolve(&self, relative_path: &Path) -> IriResult<Self> {
        let merged = if relative_path.is_empty() {
            self.clone()
        } else if relative_path.is_absolute() {
            relative_path.clone()
        } else if self.0.is_empty() {
            let mut new = Self::root();
            new.push(&relative_path.0)?;
            new
        } else {
            let mut new = self.clone();
            let _ = new.pop_slug();
            new.push(&relative_path.0)?;
            new
        };
        merged.normalize()
    }

    /// Returns `true` if this path is fully normalized, else `false`.
    pub fn is_normalized(&self) -> bool {
        self.0
            .split(PATH_SEP)
            .all(|segment| segment != DOT && segment != DOT_DOT)
    }

    /// Returns true if this path starts with the well-known prefix defined in RFC-8615.
    pub fn is_well_known(&self) -> bool {
        self.0.starts_with(WELL_KNOWN)
    }

    fn hierarchical_segments(&self) -> Vec<String> {
        self.0.split(PATH_SEP).map(|s| s.to_string()).collect()
    }

    /// Push a new segment onto the end of the path.
    pub fn push(&mut self, segment: &str) -> IriResult<()> {
        if parse::is_path(segment) {
            if self.0.ends_with(PATH_SEP) || self.0.is_empty() {
                self.0 = format!("{}{}", self.0, segment);
            } else {
                self.0 = format!("{}/{}", self.0, segment);
            }
            Ok(())
        } else {
            Err(ErrorKind::InvalidChar(Component::Path).into())
        }
    }

    /// Returns `true` if this path ends in a _slug_, else `false`.
    pub fn has_slug(&self) -> bool {
        !self.0.is_empty() && !self.0.ends_with(PATH_SEP)
    }

    /// Return the slug from the end of the path, if present.
    pub fn slug(&self) -> Option<&str> {
        if self.has_slug() {
            self.0.rsplit(PATH_SEP_CHAR).next()
        } else {
            None
        }
    }

    /// Pop the slug from the end of the path, if present, leaving a trailing slash behind.
    pub fn pop_slug(&mut self) -> Option<String> {
        let mut segments = self.hierarchical_segments();
        let last = segments.pop();
        self.0 = segments.join(PATH_SEP);
        if !self.0.is_empty() || matches!(last, Some(ref s) if !s.is_empty()) {
            self.0.push(PATH_SEP_CHAR);
        }
        last
    }

    /// Finds the length, in bytes, of the longest shared prefix of `self` and `other` that ends
    /// exactly at a `/` boundary (i.e. the deepest common ancestor directory). Used by
    /// relativization to decide how many `PathPrefix::UpReferences` are required.
    pub fn common_directory_prefix_len(&self, other: &Path) -> usize {
        let a = self.0.as_bytes();
        let b = other.0.as_bytes();
        let max = a.len().min(b.len());
        let mut i = 0;
        let mut last_slash = 0;
        while i < max && a[i] == b[i] {
            if a[i] == PATH_SEP_CHAR as u8 {
                last_slash = i + 1;
            }
            i += 1;
        }
        last_slash
    }

    /// Counts the number of remaining path segments (`/`-delimited, including the final slug)
    /// after byte offset `from`.
    pub fn remaining_segments_after(&self, from: usize) -> usize {
        if from >= self.0.len() {
            return 0;
        }
        self.0[from..].matches(PATH_SEP_CHAR).count()
    }

    pub fn suffix_from(&self, from: usize) -> &str {
        &self.0[from.min(self.0.len())..]
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_segments() {
        let path = Path::from_str("/a/b/c/./../../g").unwrap();
        assert_eq!(path.normalize().unwrap().to_string(), "/a/g");
    }

    #[test]
    fn normalize_keeps_trailing_slash() {
        let path = Path::from_str("/a/b/../").unwrap();
        assert_eq!(path.normalize().unwrap().to_string(), "/a/");
    }

    #[test]
    fn resolve_relative_merges_against_base_directory() {
        let base = Path::from_str("/a/b/c").unwrap();
        let rel = Path::from_str("../g").unwrap();
        assert_eq!(base.resolve(&rel).unwrap().to_string(), "/a/g");
    }

    #[test]
    fn resolve_absolute_reference_replaces_path() {
        let base = Path::from_str("/a/b/c").unwrap();
        let rel = Path::from_str("/g").unwrap();
        assert_eq!(base.resolve(&rel).unwrap().to_string(), "/g");
    }

    #[test]
    fn common_directory_prefix_finds_shared_ancestor() {
        let a = Path::from_str("/a/b/c/d").unwrap();
        let b = Path::from_str("/a/b/x/y").unwrap();
        let prefix = a.common_directory_prefix_len(&b);
        assert_eq!(&a.value()[..prefix], "/a/b/");
    }
}
