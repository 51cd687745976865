use crate::compat::{Cow, String, ToString, Vec};
use crate::components::{Fragment, Host, Path, Port, Query, Scheme, UriComponent, UserInfo};
use crate::error::{Error, Result};
use crate::parser::parse_components;
use crate::resolver::remove_dot_segments;
use crate::uri_components::UriComponents;
use core::fmt;
use core::str::FromStr;

/// An RFC 3986 URI reference.
///
/// A `Uri` is immutable: every `with_*` method returns a new value, checked
/// against the same rules as a parsed one:
/// - user information and port require a host;
/// - with a host, the path is empty or starts with `/`;
/// - without a host, the path does not start with `//`;
/// - without scheme and host, the first path segment has no `:`.
///
/// ```
/// use urival::Uri;
///
/// let uri = Uri::parse("HTTP://User@Example.COM:80/a/./b?q#f").unwrap();
/// assert_eq!(uri.scheme().value(), Some("http"));
/// assert_eq!(uri.host().value(), Some("example.com"));
/// assert_eq!(uri.to_string(), "http://User@example.com/a/./b?q#f");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uri {
    scheme: Scheme,
    user_info: UserInfo,
    host: Host,
    port: Port,
    path: Path,
    query: Query,
    fragment: Fragment,
}

impl Uri {
    /// Parse a URI reference. The empty string is a valid, empty reference.
    ///
    /// # Errors
    ///
    /// Returns a syntax error when the string cannot be split into
    /// components or when a component is invalid.
    pub fn parse(input: &str) -> Result<Self> {
        let components = parse_components(input)?;
        Self::from_components(&components)
    }

    /// Build a URI from raw, possibly encoded, components.
    ///
    /// # Errors
    ///
    /// Returns a syntax error when a component is invalid or when the
    /// components do not form a valid URI.
    pub fn from_components(components: &UriComponents<'_>) -> Result<Self> {
        Self::from_parts(
            Scheme::new(components.scheme.as_deref())?,
            UserInfo::new(components.user.as_deref(), components.pass.as_deref())?,
            Host::new(components.host.as_deref())?,
            Port::new(components.port),
            Path::new(&components.path)?,
            Query::new(components.query.as_deref())?,
            Fragment::new(components.fragment.as_deref())?,
        )
    }

    pub(crate) fn from_parts(
        scheme: Scheme,
        user_info: UserInfo,
        host: Host,
        port: Port,
        path: Path,
        query: Query,
        fragment: Fragment,
    ) -> Result<Self> {
        let uri = Self {
            scheme,
            user_info,
            host,
            port,
            path,
            query,
            fragment,
        };
        uri.validate()?;
        Ok(uri)
    }

    fn validate(&self) -> Result<()> {
        let path = self.path.value();

        if self.host.is_present() {
            if !path.is_empty() && !path.starts_with('/') {
                tracing::debug!(path, "path must be absolute when a host is present");
                return Err(Error::InvalidPath(path.to_string()));
            }
            return Ok(());
        }

        if self.user_info.is_present() || self.port.is_present() {
            tracing::debug!("user info or port without a host");
            return Err(Error::InvalidUri(self.to_string()));
        }

        if path.starts_with("//") {
            tracing::debug!(path, "path would be read as an authority");
            return Err(Error::InvalidPath(path.to_string()));
        }

        if !self.scheme.is_present() && path.split('/').next().is_some_and(|s| s.contains(':')) {
            tracing::debug!(path, "first path segment would be read as a scheme");
            return Err(Error::InvalidPath(path.to_string()));
        }

        Ok(())
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn port(&self) -> &Port {
        &self.port
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Check if the port is absent or standard for the scheme
    pub fn has_standard_port(&self) -> bool {
        self.port
            .value()
            .is_none_or(|port| self.scheme.scheme_type().is_standard_port(port))
    }

    /// `[ userinfo "@" ] host [ ":" port ]`, without a standard port.
    /// `None` when the host is absent.
    pub fn authority(&self) -> Option<String> {
        if !self.host.is_present() {
            return None;
        }

        let mut authority = self.user_info.uri_component();
        authority.push_str(&self.host.uri_component());
        if !self.has_standard_port() {
            authority.push_str(&self.port.uri_component());
        }
        Some(authority)
    }

    /// Check if every component is absent and the path is empty
    pub fn is_empty(&self) -> bool {
        !self.scheme.is_present()
            && !self.host.is_present()
            && self.path.is_empty()
            && !self.query.is_present()
            && !self.fragment.is_present()
    }

    /// The components in encoded form
    pub fn components(&self) -> UriComponents<'_> {
        UriComponents {
            scheme: self.scheme.encoded(),
            user: self.user_info.user.encoded(),
            pass: self.user_info.pass.encoded(),
            host: self.host.to_encoded(),
            port: self.port.value(),
            path: self.path.to_encoded().unwrap_or_default(),
            query: self.query.encoded(),
            fragment: self.fragment.encoded(),
        }
    }

    fn with(&self, update: impl FnOnce(&mut Self)) -> Result<Self> {
        let mut uri = self.clone();
        update(&mut uri);
        uri.validate()?;
        Ok(uri)
    }

    /// # Errors
    ///
    /// Returns an error if the scheme is invalid.
    pub fn with_scheme(&self, scheme: Option<&str>) -> Result<Self> {
        let scheme = Scheme::new(scheme)?;
        self.with(|uri| uri.scheme = scheme)
    }

    /// # Errors
    ///
    /// Returns an error if the user information is invalid or the URI has
    /// no host.
    pub fn with_user_info(&self, user: Option<&str>, pass: Option<&str>) -> Result<Self> {
        let user_info = UserInfo::new(user, pass)?;
        self.with(|uri| uri.user_info = user_info)
    }

    /// # Errors
    ///
    /// Returns an error if the host is invalid, or if it is removed while
    /// user information or a port remain.
    pub fn with_host(&self, host: Option<&str>) -> Result<Self> {
        let host = Host::new(host)?;
        self.with(|uri| uri.host = host)
    }

    /// # Errors
    ///
    /// Returns an error if a port is set on a URI without host.
    pub fn with_port(&self, port: Option<u16>) -> Result<Self> {
        self.with(|uri| uri.port = Port::new(port))
    }

    /// # Errors
    ///
    /// Returns an error if the path is invalid or conflicts with the
    /// presence or absence of an authority.
    pub fn with_path(&self, path: &str) -> Result<Self> {
        let path = Path::new(path)?;
        self.with(|uri| uri.path = path)
    }

    /// # Errors
    ///
    /// Returns an error if the query contains control characters.
    pub fn with_query(&self, query: Option<&str>) -> Result<Self> {
        let query = Query::new(query)?;
        self.with(|uri| uri.query = query)
    }

    /// # Errors
    ///
    /// Returns an error if the fragment contains control characters.
    pub fn with_fragment(&self, fragment: Option<&str>) -> Result<Self> {
        let fragment = Fragment::new(fragment)?;
        self.with(|uri| uri.fragment = fragment)
    }

    /// Syntax-based normalization: dot segments removed (unless the URI is
    /// a relative-path reference), query pairs sorted, standard port
    /// dropped and an empty path with an authority turned into `/`.
    /// Scheme and host case and unreserved characters are normalized at
    /// construction already.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let has_authority = self.host.is_present();

        let mut path = if self.path.is_absolute() || self.scheme.is_present() || has_authority {
            remove_dot_segments(self.path.value()).into_owned()
        } else {
            self.path.value().to_string()
        };
        if has_authority && path.is_empty() {
            path.push('/');
        }
        if !has_authority && path.starts_with("//") {
            path.insert_str(0, "/.");
        }

        let query = match self.query.value() {
            Some(query) => {
                let mut pairs: Vec<&str> = query.split('&').collect();
                pairs.sort_unstable();
                Query::from_stored(Some(pairs.join("&")))
            }
            None => Query::absent(),
        };

        let port = if self.has_standard_port() {
            Port::new(None)
        } else {
            self.port
        };

        Self {
            scheme: self.scheme.clone(),
            user_info: self.user_info.clone(),
            host: self.host.clone(),
            port,
            path: Path::from_stored(path),
            query,
            fragment: self.fragment.clone(),
        }
    }

    /// Copy of the URI without its fragment
    #[must_use]
    pub(crate) fn without_fragment(&self) -> Self {
        Self {
            fragment: Fragment::absent(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scheme.uri_component())?;
        if let Some(authority) = self.authority() {
            f.write_str("//")?;
            f.write_str(&authority)?;
        }
        f.write_str(&self.path.to_encoded().unwrap_or(Cow::Borrowed("")))?;
        f.write_str(&self.query.uri_component())?;
        f.write_str(&self.fragment.uri_component())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let value = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
