#![allow(clippy::module_name_repetitions)]

use crate::error::{Error as IriError, ErrorKind, Result as IriResult};
use crate::{parse, Normalize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The port sub-component of an `Authority`, a 16-bit unsigned integer.
///
/// ```rust
/// use loomrdf_iri::Port;
/// use std::str::FromStr;
///
/// let http_port: Port = Port::from_str("80").unwrap();
/// let https_port: Port = 443.into();
/// ```
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Port(u16);

///
/// The user-information sub-component of an `Authority`; `user[:password]`.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserInfo {
    user_name: String,
    password: Option<String>,
}

///
/// The `Authority` component of a `UriView`, comprising an optional user-information part, a
/// required host, and an optional port. This implementation treats the host as an opaque,
/// percent-escaped string rather than distinguishing IPv4/IPv6/reg-name forms; that distinction
/// is not needed by any operation in this crate.
///
/// # Example
///
/// ```rust
/// use loomrdf_iri::Authority;
/// use std::str::FromStr;
///
/// let authority = Authority::from_str("john.doe@www.example.com:123").unwrap();
/// assert!(authority.has_user_info());
/// assert!(authority.has_port());
/// ```
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Authority {
    user_info: Option<UserInfo>,
    host: String,
    port: Option<Port>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for Port {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Port {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .map(Self)
            .map_err(|_| ErrorKind::InvalidChar(crate::error::Component::Authority).into())
    }
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl Port {
    pub fn value(&self) -> u16 {
        self.0
    }
}

// ------------------------------------------------------------------------------------------------

impl Display for UserInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_name)?;
        if let Some(password) = &self.password {
            write!(f, ":{password}")?;
        }
        Ok(())
    }
}

impl UserInfo {
    pub fn new<S>(user_name: S) -> IriResult<Self>
    where
        S: Into<String>,
    {
        let user_name = user_name.into();
        if parse::is_iuserinfo(&user_name) {
            Ok(Self {
                user_name,
                password: None,
            })
        } else {
            Err(ErrorKind::InvalidChar(crate::error::Component::Authority).into())
        }
    }

    pub fn with_password<S>(user_name: S, password: S) -> IriResult<Self>
    where
        S: Into<String>,
    {
        let mut info = Self::new(user_name)?;
        info.password = Some(password.into());
        Ok(info)
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn password(&self) -> Option<&String> {
        self.password.as_ref()
    }
}

// ------------------------------------------------------------------------------------------------

impl Display for Authority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "//")?;
        if let Some(user_info) = &self.user_info {
            write!(f, "{user_info}@")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = &self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl FromStr for Authority {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (user_info, rest) = match s.rfind('@') {
            Some(at) => (Some(UserInfo::new(&s[..at])?), &s[at + 1..]),
            None => (None, s),
        };
        let (host, port) = if rest.starts_with('[') {
            match rest.find(']') {
                Some(close) if rest[close + 1..].starts_with(':') => (
                    rest[..=close].to_string(),
                    Some(Port::from_str(&rest[close + 2..])?),
                ),
                _ => (rest.to_string(), None),
            }
        } else {
            match rest.rfind(':') {
                Some(colon) => {
                    let port = if rest[colon + 1..].is_empty() {
                        None
                    } else {
                        Some(Port::from_str(&rest[colon + 1..])?)
                    };
                    (rest[..colon].to_string(), port)
                }
                None => (rest.to_string(), None),
            }
        };
        if !parse::is_ihost(&host) {
            return Err(ErrorKind::InvalidChar(crate::error::Component::Authority).into());
        }
        Ok(Self {
            user_info,
            host,
            port,
        })
    }
}

impl Normalize for Authority {
    // SPEC: RFC-3986 §6.2.2.1 — the host sub-component is case-insensitive.
    fn normalize(self) -> IriResult<Self> {
        Ok(Self {
            host: self.host.to_lowercase(),
            ..self
        })
    }
}

impl Authority {
    pub fn new<S>(host: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            user_info: None,
            host: host.into(),
            port: None,
        }
    }

    pub fn with_port<S>(host: S, port: Port) -> Self
    where
        S: Into<String>,
    {
        Self {
            user_info: None,
            host: host.into(),
            port: Some(port),
        }
    }

    pub fn has_user_info(&self) -> bool {
        self.user_info.is_some()
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    pub fn set_user_info(&mut self, user_info: Option<UserInfo>) {
        self.user_info = user_info;
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    pub fn port(&self) -> Option<Port> {
        self.port
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_only() {
        let a = Authority::from_str("example.org").unwrap();
        assert_eq!(a.host(), "example.org");
        assert!(!a.has_port());
        assert!(!a.has_user_info());
    }

    #[test]
    fn parses_userinfo_host_port() {
        let a = Authority::from_str("john.doe@www.example.com:123").unwrap();
        assert_eq!(a.user_info().unwrap().user_name(), "john.doe");
        assert_eq!(a.host(), "www.example.com");
        assert_eq!(a.port().unwrap().value(), 123);
    }

    #[test]
    fn parses_ipv6_literal() {
        let a = Authority::from_str("[2001:db8::7]").unwrap();
        assert_eq!(a.host(), "[2001:db8::7]");
        assert!(!a.has_port());
    }

    #[test]
    fn display_round_trips() {
        let a = Authority::from_str("john.doe@www.example.com:123").unwrap();
        assert_eq!(a.to_string(), "//john.doe@www.example.com:123");
    }
}
