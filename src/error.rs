use crate::compat::String;
use crate::unicode::idna::IdnaErrors;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A component or a whole URI does not follow the RFC 3986 grammar.
    Syntax,
    /// The crate was built without the IDNA backend but a non-ASCII host was met.
    MissingSupport,
    /// The IDNA backend rejected a domain conversion.
    ConversionFailed,
}

/// Errors that can occur while building, parsing or converting URIs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid scheme format
    #[error("the scheme `{0}` is invalid")]
    InvalidScheme(String),
    /// Invalid user or password
    #[error("the user info `{0}` is invalid")]
    InvalidUserInfo(String),
    /// Invalid host format
    #[error("the host `{0}` is invalid")]
    InvalidHost(String),
    /// Invalid port number
    #[error("the port `{0}` is invalid")]
    InvalidPort(String),
    /// Invalid path, or a path that conflicts with the rest of the URI
    #[error("the path `{0}` is invalid")]
    InvalidPath(String),
    /// Invalid IPv4 address
    #[error("the IPv4 address `{0}` is invalid")]
    InvalidIpv4(String),
    /// Invalid IPv6 address
    #[error("the IPv6 address `{0}` is invalid")]
    InvalidIpv6(String),
    /// Percent-encoded octets that do not decode to UTF-8
    #[error("the percent-encoded string `{0}` is invalid")]
    InvalidPercentEncoding(String),
    /// The string cannot be split into URI components
    #[error("the URI `{0}` could not be parsed")]
    InvalidUri(String),
    /// IDNA conversion requested but the backend is not compiled in
    #[error("support for IDN host requires the `idna` feature")]
    MissingIdnaSupport,
    /// IDNA conversion rejected by the backend
    #[error("the domain `{domain}` could not be converted: {errors}")]
    ConversionFailed { domain: String, errors: IdnaErrors },
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingIdnaSupport => ErrorKind::MissingSupport,
            Self::ConversionFailed { .. } => ErrorKind::ConversionFailed,
            _ => ErrorKind::Syntax,
        }
    }

    /// Check if the error is a syntax error
    pub fn is_syntax(&self) -> bool {
        self.kind() == ErrorKind::Syntax
    }
}

/// Result type for URI operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::ToString;

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::InvalidScheme("1a".to_string()).kind(),
            ErrorKind::Syntax
        );
        assert_eq!(Error::MissingIdnaSupport.kind(), ErrorKind::MissingSupport);
        let failed = Error::ConversionFailed {
            domain: "xn--a".to_string(),
            errors: IdnaErrors::PUNYCODE,
        };
        assert_eq!(failed.kind(), ErrorKind::ConversionFailed);
        assert!(!failed.is_syntax());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvalidPort("99999".to_string()).to_string(),
            "the port `99999` is invalid"
        );
    }
}
