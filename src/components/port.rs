use super::UriComponent;
use crate::checkers::parse_port;
use crate::compat::{Cow, String, ToString, format};
use crate::error::{Error, Result};
use crate::uri::Uri;
use core::fmt;

/// Port number, possibly absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Port(Option<u16>);

impl Port {
    pub const fn new(port: Option<u16>) -> Self {
        Self(port)
    }

    /// Parse a port from its decimal form. An empty string is the absent port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPort`] for non-digit or out of range input.
    pub fn parse(port: &str) -> Result<Self> {
        if port.is_empty() {
            return Ok(Self(None));
        }
        parse_port(port)
            .map(|port| Self(Some(port)))
            .ok_or_else(|| Error::InvalidPort(port.to_string()))
    }

    pub fn from_uri(uri: &Uri) -> Self {
        *uri.port()
    }

    pub fn value(self) -> Option<u16> {
        self.0
    }

    pub fn is_absent(self) -> bool {
        self.0.is_none()
    }
}

impl UriComponent for Port {
    fn to_encoded(&self) -> Option<Cow<'_, str>> {
        self.0.map(|port| Cow::Owned(port.to_string()))
    }

    fn uri_component(&self) -> String {
        self.0.map(|port| format!(":{port}")).unwrap_or_default()
    }

    fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(port) => write!(f, "{port}"),
            None => Ok(()),
        }
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self(Some(port))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Port::parse("8080").unwrap().value(), Some(8080));
        assert_eq!(Port::parse("").unwrap(), Port::new(None));
        assert!(matches!(Port::parse("65536"), Err(Error::InvalidPort(_))));
        assert!(Port::parse("8o").is_err());
    }

    #[test]
    fn test_uri_component() {
        assert_eq!(Port::from(81).uri_component(), ":81");
        assert_eq!(Port::new(None).uri_component(), "");
        assert_eq!(Port::from(0).to_string(), "0");
    }
}
