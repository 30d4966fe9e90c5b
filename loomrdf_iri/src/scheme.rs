#![allow(clippy::module_name_repetitions)]

use crate::error::{Error as IriError, ErrorKind, Result as IriResult};
use crate::Normalize;
use crate::{parse, ValidateStr};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Provides the `Scheme` component of a `UriView`.
///
/// The scheme for a URI determines the syntax and meaning of the following components. It is a
/// single string value, compared case-insensitively per RFC 3986 §3.1.
///
/// ```rust
/// use loomrdf_iri::Scheme;
/// use std::str::FromStr;
///
/// let http_scheme = Scheme::from_str("http").unwrap();
/// assert_eq!(http_scheme, Scheme::http());
/// ```
///
#[derive(Clone, Debug, Eq)]
pub struct Scheme(String);

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl PartialEq for Scheme {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Hash for Scheme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_lowercase().hash(state);
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.0)
    }
}

impl FromStr for Scheme {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Err(ErrorKind::IsEmpty.into())
        } else if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ErrorKind::InvalidChar(crate::error::Component::Scheme).into())
        }
    }
}

impl ValidateStr for Scheme {
    fn is_valid(s: &str) -> bool {
        parse::is_scheme(s)
    }
}

impl Normalize for Scheme {
    // SPEC: RFC-3986 §6.2.2.1 — scheme names are normalized to lowercase.
    fn normalize(self) -> IriResult<Self> {
        Ok(Self(self.0.to_lowercase()))
    }
}

impl Scheme {
    /// Returns the scheme name without the trailing `":"`.
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn http() -> Self {
        Self("http".to_string())
    }

    pub fn https() -> Self {
        Self("https".to_string())
    }

    pub fn file() -> Self {
        Self("file".to_string())
    }

    pub fn urn() -> Self {
        Self("urn".to_string())
    }

    pub fn mailto() -> Self {
        Self("mailto".to_string())
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_case_insensitive() {
        assert_eq!(
            Scheme::from_str("HTTP").unwrap(),
            Scheme::from_str("http").unwrap()
        );
    }

    #[test]
    fn empty_scheme_is_rejected() {
        assert!(Scheme::from_str("").is_err());
    }

    #[test]
    fn display_includes_colon() {
        assert_eq!(Scheme::http().to_string(), "http:");
    }
}
