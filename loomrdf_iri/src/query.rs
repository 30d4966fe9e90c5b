/*!
Provides the `Query` component of a `UriView`.
*/

#![allow(clippy::module_name_repetitions)]

use crate::error::{Component, Error as IriError, ErrorKind};
use crate::parse;
use crate::Normalize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The query component of a `UriView`, everything between the `?` and the start of the fragment
/// (or the end of the URI). Stored without the leading `?`.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    inner: String,
}

///
/// One `key[=value]` pair of a query string, used to build up a `Query` value.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryPart {
    key: String,
    value: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{}", self.inner)
    }
}

impl FromStr for Query {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if parse::is_iquery(s) {
            Ok(Self {
                inner: s.to_string(),
            })
        } else {
            Err(ErrorKind::InvalidChar(Component::Query).into())
        }
    }
}

impl Normalize for Query {}

impl Query {
    pub fn new(part: &QueryPart) -> Self {
        Self { inner: part.to_string() }
    }

    /// Appends another part to the query string, joined with `&`.
    pub fn push(&mut self, part: &QueryPart) {
        if self.inner.is_empty() {
            self.inner = part.to_string();
        } else {
            self.inner = format!("{}&{}", self.inner, part);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn value(&self) -> &str {
        &self.inner
    }

    pub fn clear(&mut self) {
        self.inner = String::new();
    }
}

// ------------------------------------------------------------------------------------------------

impl Display for QueryPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)?;
        if let Some(value) = &self.value {
            write!(f, "={value}")?;
        }
        Ok(())
    }
}

impl QueryPart {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: None,
        }
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: Some(value.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&String> {
        self.value.as_ref()
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_part_has_no_separator() {
        let q = Query::new(&QueryPart::with_value("tag", "networking"));
        assert_eq!(q.to_string(), "?tag=networking");
    }

    #[test]
    fn pushed_parts_are_ampersand_joined() {
        let mut q = Query::new(&QueryPart::with_value("tag", "networking"));
        q.push(&QueryPart::with_value("order", "newest"));
        assert_eq!(q.to_string(), "?tag=networking&order=newest");
    }

    #[test]
    fn key_only_part_has_no_equals() {
        let q = Query::new(&QueryPart::new("flag"));
        assert_eq!(q.to_string(), "?flag");
    }
}
