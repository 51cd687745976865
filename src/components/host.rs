use super::UriComponent;
use crate::character_sets::is_forbidden_control;
use crate::checkers::{is_ip_future, is_zone_id};
use crate::compat::{Cow, String, ToString, format};
use crate::error::{Error, Result};
use crate::ipv4::{parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::unicode::idna::{self, IdnaOption};
use crate::uri::Uri;
use core::fmt;

/// Kind of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostType {
    /// `reg-name`, stored in its lower-cased ASCII form
    #[default]
    RegisteredName,
    Ipv4,
    /// `[IPv6address]`, with an optional RFC 6874 zone identifier
    Ipv6,
    /// `[IPvFuture]`
    IpFuture,
}

/// URI host.
///
/// Registered names go through IDNA and are stored as lower-cased ASCII,
/// IPv6 literals are stored compressed, with their brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Host {
    value: Option<String>,
    host_type: HostType,
}

impl Host {
    /// Validate and normalize a host. `None` is the absent host, the empty
    /// string is a valid empty registered name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] for a malformed host and
    /// [`Error::MissingIdnaSupport`] for a non-ASCII host when the `idna`
    /// feature is disabled.
    pub fn new(host: Option<&str>) -> Result<Self> {
        let Some(host) = host else {
            return Ok(Self::default());
        };

        if host.bytes().any(is_forbidden_control) {
            return Err(Error::InvalidHost(host.to_string()));
        }

        if let Some(literal) = host.strip_prefix('[') {
            let Some(inner) = literal.strip_suffix(']') else {
                tracing::debug!(host, "unterminated IP literal");
                return Err(Error::InvalidHost(host.to_string()));
            };
            return Self::parse_ip_literal(host, inner);
        }

        if let Ok(address) = parse_ipv4(host) {
            return Ok(Self {
                value: Some(serialize_ipv4(address)),
                host_type: HostType::Ipv4,
            });
        }

        Self::parse_registered_name(host)
    }

    fn parse_ip_literal(host: &str, inner: &str) -> Result<Self> {
        let invalid = || Error::InvalidHost(host.to_string());

        if inner.starts_with(['v', 'V']) {
            if !is_ip_future(inner) {
                return Err(invalid());
            }
            return Ok(Self {
                value: Some(host.to_string()),
                host_type: HostType::IpFuture,
            });
        }

        // RFC 6874: the zone delimiter is an encoded "%"
        let (address, zone) = match inner.find('%') {
            Some(pos) => {
                let zone = inner[pos..].strip_prefix("%25").ok_or_else(invalid)?;
                if !is_zone_id(zone) {
                    return Err(invalid());
                }
                (&inner[..pos], Some(zone))
            }
            None => (inner, None),
        };

        let segments = parse_ipv6(address).map_err(|_| invalid())?;
        let value = match zone {
            Some(zone) => format!("[{}%25{zone}]", serialize_ipv6(&segments)),
            None => format!("[{}]", serialize_ipv6(&segments)),
        };

        Ok(Self {
            value: Some(value),
            host_type: HostType::Ipv6,
        })
    }

    fn parse_registered_name(host: &str) -> Result<Self> {
        let result = idna::to_ascii(host, IdnaOption::for_idna2008_ascii()).map_err(|e| {
            if e.is_syntax() {
                Error::InvalidHost(host.to_string())
            } else {
                e
            }
        })?;

        if result.has_errors() {
            tracing::debug!(host, errors = %result.errors(), "registered name rejected");
            return Err(Error::InvalidHost(host.to_string()));
        }

        Ok(Self {
            value: Some(result.into_value()),
            host_type: HostType::RegisteredName,
        })
    }

    pub fn from_uri(uri: &Uri) -> Self {
        uri.host().clone()
    }

    /// The host in ASCII form
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.value.as_deref().is_none_or(str::is_empty)
    }

    pub fn is_ip(&self) -> bool {
        self.value.is_some() && self.host_type != HostType::RegisteredName
    }

    pub fn is_ipv4(&self) -> bool {
        self.value.is_some() && self.host_type == HostType::Ipv4
    }

    pub fn is_ipv6(&self) -> bool {
        self.value.is_some() && self.host_type == HostType::Ipv6
    }

    /// Check if the host is a non-empty registered name
    pub fn is_domain(&self) -> bool {
        !self.is_empty() && self.host_type == HostType::RegisteredName
    }

    /// The host in Unicode form. IP literals and hosts that cannot be
    /// converted are returned in their ASCII form.
    pub fn to_unicode(&self) -> Option<Cow<'_, str>> {
        let value = self.value.as_deref()?;
        if self.host_type != HostType::RegisteredName || !idna::has_punycode(value) {
            return Some(Cow::Borrowed(value));
        }

        match idna::to_unicode(value, IdnaOption::for_idna2008_unicode()) {
            Ok(result) if !result.has_errors() => Some(Cow::Owned(result.into_value())),
            _ => Some(Cow::Borrowed(value)),
        }
    }
}

impl UriComponent for Host {
    fn to_encoded(&self) -> Option<Cow<'_, str>> {
        self.value.as_deref().map(Cow::Borrowed)
    }

    fn uri_component(&self) -> String {
        self.value.clone().unwrap_or_default()
    }

    fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or_default())
    }
}
