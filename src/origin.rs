use crate::compat::{String, ToString};
use crate::components::UriComponent;
use crate::uri::Uri;
use core::fmt;

/// A tuple origin: scheme, ASCII host and non-standard port
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port, `None` when it is the scheme default
    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// Compute the origin of a URI.
///
/// Only `ftp`, `http`, `https`, `ws` and `wss` URIs with a host have one.
/// A `blob:` URI has the origin of the URI held in its path, if that URI
/// has one and carries neither query nor fragment.
pub fn origin(uri: &Uri) -> Option<Origin> {
    let scheme = uri.scheme().value()?;

    if scheme == "blob" {
        let nested = Uri::parse(&uri.path().to_string()).ok()?;
        if nested.query().is_present()
            || nested.fragment().is_present()
            || !nested.scheme().scheme_type().is_special()
        {
            return None;
        }
        return origin(&nested);
    }

    let scheme_type = uri.scheme().scheme_type();
    if !scheme_type.is_special() || uri.host().is_empty() {
        return None;
    }

    Some(Origin {
        scheme: scheme.to_string(),
        host: uri.host().value()?.to_string(),
        port: uri
            .port()
            .value()
            .filter(|&port| !scheme_type.is_standard_port(port)),
    })
}

/// Check if two URIs point to the same document: their normalized forms
/// are equal once fragments are removed.
pub fn is_same_document(uri: &Uri, other: &Uri) -> bool {
    uri.without_fragment().normalize().to_string()
        == other.without_fragment().normalize().to_string()
}

/// Check if two URIs have different origins. A URI without origin is
/// cross-origin to everything, itself included.
pub fn is_cross_origin(uri: &Uri, other: &Uri) -> bool {
    match (origin(uri), origin(other)) {
        (Some(origin), Some(other)) => origin != other,
        _ => true,
    }
}
