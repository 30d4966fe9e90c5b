/*!
Provides the `UriView` type, a URI parsed into its five RFC 3986 §3 components.
*/

#![allow(clippy::module_name_repetitions)]

use crate::authority::Authority;
use crate::error::{Error as IriError, ErrorKind, Result as IriResult};
use crate::fragment::Fragment;
use crate::parse;
use crate::path::{Path, PathPrefix};
use crate::query::Query;
use crate::scheme::Scheme;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// A URI parsed into five non-owning slices: scheme, authority, path, query, and fragment. The
/// `path_prefix` slice is an internal aid used only while relativizing a URI against a base; it
/// plays no part in parsing and is always `PathPrefix::None` for a freshly-parsed value.
///
/// # Example
///
/// ```rust
/// use loomrdf_iri::UriView;
/// use std::str::FromStr;
///
/// let uri = UriView::from_str(
///     "https://john.doe@www.example.com:123/forum/questions/?tag=networking&order=newest#top",
/// ).unwrap();
/// assert_eq!(uri.scheme().unwrap().name(), "https");
/// assert_eq!(uri.fragment().unwrap().value(), "top");
/// ```
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UriView {
    scheme: Option<Scheme>,
    authority: Option<Authority>,
    path_prefix: PathPrefix,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for UriView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "{authority}")?;
            if !self.path.is_empty() && !self.path.is_absolute() {
                write!(f, "/")?;
            }
        }
        match &self.path_prefix {
            PathPrefix::None => {}
            PathPrefix::Literal(s) => write!(f, "{s}")?,
            PathPrefix::UpReferences(n) => {
                for _ in 0..*n {
                    write!(f, "../")?;
                }
            }
        }
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for UriView {
    type Err = IriError;

    // SPEC: RFC 3986 §3, "Syntax Components".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ErrorKind::IsEmpty.into());
        }

        let mut rest = s;

        let scheme = match rest.find(':') {
            Some(colon) if !rest[..colon].contains('/') && parse::is_scheme(&rest[..colon]) => {
                let scheme = Scheme::from_str(&rest[..colon])?;
                rest = &rest[colon + 1..];
                Some(scheme)
            }
            _ => None,
        };

        let authority = if let Some(stripped) = rest.strip_prefix("//") {
            let end = stripped
                .find(['/', '?', '#'])
                .unwrap_or(stripped.len());
            let authority = Authority::from_str(&stripped[..end])?;
            rest = &stripped[end..];
            Some(authority)
        } else {
            None
        };

        let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
        let path = Path::from_str(&rest[..path_end])?;
        rest = &rest[path_end..];

        let query = if let Some(stripped) = rest.strip_prefix('?') {
            let end = stripped.find('#').unwrap_or(stripped.len());
            let query = Query::from_str(&stripped[..end])?;
            rest = &stripped[end..];
            Some(query)
        } else {
            None
        };

        let fragment = rest
            .strip_prefix('#')
            .map(Fragment::from_str)
            .transpose()?;

        Ok(Self {
            scheme,
            authority,
            path_prefix: PathPrefix::None,
            path,
            query,
            fragment,
        })
    }
}

impl UriView {
    /// Builds a `UriView` from already-validated components without re-parsing. Used by the
    /// file-URI constructor, whose percent-encoding is a superset of the generic grammar.
    pub(crate) fn from_parts(
        scheme: Option<Scheme>,
        authority: Option<Authority>,
        path: Path,
    ) -> Self {
        Self {
            scheme,
            authority,
            path_prefix: PathPrefix::None,
            path,
            query: None,
            fragment: None,
        }
    }

    pub fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_ref()
    }

    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Returns `true` if `scheme` is present; per RFC 3986 §4.3 this is exactly what makes a URI
    /// absolute (independent of whether it also carries a fragment).
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Resolves `self` as a URI reference against `base` (RFC 3986 §5.2.2).
    pub fn resolve(&self, base: &UriView) -> IriResult<UriView> {
        let reference = self;

        if let Some(scheme) = &reference.scheme {
            return Ok(UriView {
                scheme: Some(scheme.clone()),
                authority: reference.authority.clone(),
                path_prefix: PathPrefix::None,
                path: reference.path.clone().normalize()?,
                query: reference.query.clone(),
                fragment: reference.fragment.clone(),
            });
        }

        if let Some(authority) = &reference.authority {
            return Ok(UriView {
                scheme: base.scheme.clone(),
                authority: Some(authority.clone()),
                path_prefix: PathPrefix::None,
                path: reference.path.clone().normalize()?,
                query: reference.query.clone(),
                fragment: reference.fragment.clone(),
            });
        }

        let (path, query) = if reference.path.is_empty() {
            (
                base.path.clone(),
                reference.query.clone().or_else(|| base.query.clone()),
            )
        } else if reference.path.is_absolute() {
            (reference.path.clone().normalize()?, reference.query.clone())
        } else {
            (base.path.resolve(&reference.path)?, reference.query.clone())
        };

        Ok(UriView {
            scheme: base.scheme.clone(),
            authority: base.authority.clone(),
            path_prefix: PathPrefix::None,
            path,
            query,
            fragment: reference.fragment.clone(),
        })
    }

    /// Produces the shortest URI reference that `resolve`s back to `self` against `base`, or a
    /// clone of `self` when it shares neither scheme nor authority with `base`.
    pub fn relativize(&self, base: &UriView) -> UriView {
        if self.scheme != base.scheme || self.authority != base.authority {
            return self.clone();
        }

        if self.path == base.path {
            return UriView {
                scheme: None,
                authority: None,
                path_prefix: PathPrefix::None,
                path: Path::default(),
                query: self.query.clone(),
                fragment: self.fragment.clone(),
            };
        }

        let shared = base.path.common_directory_prefix_len(&self.path);
        let up_references = base.path.remaining_segments_after(shared);
        let tail = self.path.suffix_from(shared);
        let path = Path::from_str(tail).unwrap_or_default();

        UriView {
            scheme: None,
            authority: None,
            path_prefix: PathPrefix::UpReferences(up_references),
            path,
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }

    /// Returns `true` iff `self` shares `base`'s scheme and authority and its path extends
    /// strictly below `base`'s path directory.
    pub fn is_within(&self, base: &UriView) -> bool {
        if self.scheme != base.scheme || self.authority != base.authority {
            return false;
        }
        let base_path = base.path.value();
        let directory = match base_path.rfind('/') {
            Some(idx) => &base_path[..=idx],
            None => return false,
        };
        let self_path = self.path.value();
        self_path.starts_with(directory) && self_path.len() > directory.len()
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_five_components() {
        let uri = UriView::from_str(
            "https://john.doe@www.example.com:123/forum/questions/?tag=networking&order=newest#top",
        )
        .unwrap();
        assert_eq!(uri.scheme().unwrap().name(), "https");
        assert_eq!(uri.authority().unwrap().host(), "www.example.com");
        assert_eq!(uri.path().value(), "/forum/questions/");
        assert_eq!(uri.query().unwrap().value(), "tag=networking&order=newest");
        assert_eq!(uri.fragment().unwrap().value(), "top");
    }

    #[test]
    fn parses_relative_reference_with_no_scheme() {
        let uri = UriView::from_str("../g?y#s").unwrap();
        assert!(uri.scheme().is_none());
        assert_eq!(uri.path().value(), "../g");
    }

    #[test]
    fn resolve_with_scheme_reference_is_returned_unchanged() {
        let base = UriView::from_str("https://example.org/a/b/c").unwrap();
        let reference = UriView::from_str("ftp://other.example/d").unwrap();
        let resolved = reference.resolve(&base).unwrap();
        assert_eq!(resolved.to_string(), "ftp://other.example/d");
    }

    #[test]
    fn resolve_merges_relative_path_against_base_directory() {
        let base = UriView::from_str("https://example.org/a/b/c").unwrap();
        let reference = UriView::from_str("../g").unwrap();
        let resolved = reference.resolve(&base).unwrap();
        assert_eq!(resolved.to_string(), "https://example.org/a/g");
    }

    #[test]
    fn resolve_empty_reference_inherits_base_path_and_query() {
        let base = UriView::from_str("https://example.org/a/b/c?q=1").unwrap();
        let reference = UriView::from_str("").unwrap();
        let resolved = reference.resolve(&base).unwrap();
        assert_eq!(resolved.to_string(), "https://example.org/a/b/c?q=1");
    }

    #[test]
    fn relativize_round_trips_through_resolve() {
        let base = UriView::from_str("https://example.org/a/b/c").unwrap();
        let uri = UriView::from_str("https://example.org/a/g").unwrap();
        let reference = uri.relativize(&base);
        let resolved = reference.resolve(&base).unwrap();
        assert_eq!(resolved, uri);
    }

    #[test]
    fn relativize_different_authority_is_unchanged() {
        let base = UriView::from_str("https://example.org/a/b/c").unwrap();
        let uri = UriView::from_str("https://other.example/a/g").unwrap();
        let reference = uri.relativize(&base);
        assert_eq!(reference, uri);
    }

    #[test]
    fn is_within_detects_strict_descendant() {
        let base = UriView::from_str("https://example.org/a/b/").unwrap();
        let child = UriView::from_str("https://example.org/a/b/c").unwrap();
        let sibling = UriView::from_str("https://example.org/a/x").unwrap();
        assert!(child.is_within(&base));
        assert!(!sibling.is_within(&base));
    }
}
