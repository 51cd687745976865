//! Conversion from and to URI types of other crates.
//!
//! A foreign type exposes its components through [`ForeignUri`], where an
//! empty string stands for an absent component, and is rebuilt from a
//! [`Uri`] through [`FromUri`].

use crate::compat::{Cow, String, ToString};
use crate::components::{Fragment, Host, Path, Port, Query, Scheme, UserInfo};
use crate::error::Result;
use crate::uri::Uri;

/// Read access to the components of a foreign URI.
///
/// Accessors return encoded values. An empty string means the component
/// is absent, so an empty query or fragment cannot be told apart from a
/// missing one. The same holds for an empty host unless the type
/// overrides [`ForeignUri::has_authority`].
pub trait ForeignUri {
    /// Scheme, without the trailing `:`
    fn scheme(&self) -> &str;
    /// `user[:pass]`, without the trailing `@`
    fn user_info(&self) -> Cow<'_, str>;
    fn host(&self) -> &str;
    fn port(&self) -> Option<u16>;
    fn path(&self) -> &str;
    /// Query, without the leading `?`
    fn query(&self) -> &str;
    /// Fragment, without the leading `#`
    fn fragment(&self) -> &str;

    /// Whether the URI has an authority, which may have an empty host as
    /// in `file:///x`
    fn has_authority(&self) -> bool {
        !self.host().is_empty()
    }
}

/// Construction of a foreign URI from a [`Uri`]
pub trait FromUri: Sized {
    /// # Errors
    ///
    /// Returns an error if the foreign type rejects the URI.
    fn from_uri(uri: &Uri) -> Result<Self>;
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

impl Uri {
    /// Build a URI from the components of a foreign URI.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if a component is invalid or the components
    /// do not form a valid URI.
    pub fn from_foreign(foreign: &impl ForeignUri) -> Result<Self> {
        let user_info = foreign.user_info();
        let host = foreign.has_authority().then(|| foreign.host());
        Self::from_parts(
            Scheme::new(non_empty(foreign.scheme()))?,
            UserInfo::parse(non_empty(&user_info))?,
            Host::new(host)?,
            Port::new(foreign.port()),
            Path::new(foreign.path())?,
            Query::new(non_empty(foreign.query()))?,
            Fragment::new(non_empty(foreign.fragment()))?,
        )
    }

    /// Convert into a foreign URI type.
    ///
    /// # Errors
    ///
    /// Returns an error if the foreign type rejects the URI.
    pub fn to_foreign<T: FromUri>(&self) -> Result<T> {
        T::from_uri(self)
    }
}

impl FromUri for String {
    fn from_uri(uri: &Uri) -> Result<Self> {
        Ok(uri.to_string())
    }
}

#[cfg(feature = "url")]
mod url_interop {
    use super::{ForeignUri, FromUri};
    use crate::compat::{Cow, format};
    use crate::error::{Error, Result};
    use crate::uri::Uri;

    impl ForeignUri for url::Url {
        fn scheme(&self) -> &str {
            url::Url::scheme(self)
        }

        fn user_info(&self) -> Cow<'_, str> {
            match url::Url::password(self) {
                Some(pass) => Cow::Owned(format!("{}:{pass}", self.username())),
                None => Cow::Borrowed(self.username()),
            }
        }

        fn host(&self) -> &str {
            self.host_str().unwrap_or_default()
        }

        fn port(&self) -> Option<u16> {
            url::Url::port(self)
        }

        fn path(&self) -> &str {
            url::Url::path(self)
        }

        fn query(&self) -> &str {
            url::Url::query(self).unwrap_or_default()
        }

        fn fragment(&self) -> &str {
            url::Url::fragment(self).unwrap_or_default()
        }

        // `file:///x` keeps its `//` but reports no host
        fn has_authority(&self) -> bool {
            self.as_str()
                .get(url::Url::scheme(self).len() + 1..)
                .is_some_and(|rest| rest.starts_with("//"))
        }
    }

    impl FromUri for url::Url {
        fn from_uri(uri: &Uri) -> Result<Self> {
            let serialized = uri.to_string();
            url::Url::parse(&serialized).map_err(|e| {
                tracing::debug!(uri = %serialized, error = %e, "rejected by url::Url");
                Error::InvalidUri(serialized)
            })
        }
    }
}
