use crate::components::UriComponent;
use crate::error::Result;
use crate::origin::{self, Origin};
use crate::parser::UriInput;
use crate::resolver;
use crate::uri::Uri;
use core::fmt;

/// How a URI reference is written (RFC 3986 section 4.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `scheme ":" ...`
    Absolute,
    /// `"//" authority ...`
    NetworkPath,
    /// `"/" path ...`
    AbsolutePath,
    /// Anything else, the empty reference included
    RelativePath,
}

impl ReferenceKind {
    fn of(uri: &Uri) -> Self {
        if uri.scheme().is_present() {
            Self::Absolute
        } else if uri.host().is_present() {
            Self::NetworkPath
        } else if uri.path().is_absolute() {
            Self::AbsolutePath
        } else {
            Self::RelativePath
        }
    }
}

/// A URI used as the base of resolution, relativization and comparison.
///
/// ```
/// use urival::BaseUri;
///
/// let base = BaseUri::new("http://a/b/c/d;p?q").unwrap();
/// assert_eq!(base.resolve("../g").unwrap().to_string(), "http://a/b/g");
/// assert_eq!(base.relativize("http://a/b/c/g?y").unwrap().to_string(), "g?y");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUri {
    uri: Uri,
    kind: ReferenceKind,
}

impl BaseUri {
    /// # Errors
    ///
    /// Returns an error if `uri` is a string that is not a valid URI.
    pub fn new(uri: impl UriInput) -> Result<Self> {
        Ok(Self::from_uri(uri.into_uri()?))
    }

    pub fn from_uri(uri: Uri) -> Self {
        let kind = ReferenceKind::of(&uri);
        Self { uri, kind }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn into_uri(self) -> Uri {
        self.uri
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn is_absolute(&self) -> bool {
        self.kind == ReferenceKind::Absolute
    }

    pub fn is_network_path(&self) -> bool {
        self.kind == ReferenceKind::NetworkPath
    }

    pub fn is_absolute_path(&self) -> bool {
        self.kind == ReferenceKind::AbsolutePath
    }

    pub fn is_relative_path(&self) -> bool {
        self.kind == ReferenceKind::RelativePath
    }

    /// Resolve a reference against this base.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is not a valid URI.
    pub fn resolve(&self, reference: impl UriInput) -> Result<Self> {
        let reference = reference.into_uri()?;
        resolver::resolve(&self.uri, &reference).map(Self::from_uri)
    }

    /// Compute the reference that resolves to `target` against this base.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not a valid URI.
    pub fn relativize(&self, target: impl UriInput) -> Result<Self> {
        let target = target.into_uri()?;
        resolver::relativize(&self.uri, &target).map(Self::from_uri)
    }

    pub fn origin(&self) -> Option<Origin> {
        origin::origin(&self.uri)
    }

    /// # Errors
    ///
    /// Returns an error if `other` is not a valid URI.
    pub fn is_same_document(&self, other: impl UriInput) -> Result<bool> {
        Ok(origin::is_same_document(&self.uri, &other.into_uri()?))
    }

    /// # Errors
    ///
    /// Returns an error if `other` is not a valid URI.
    pub fn is_cross_origin(&self, other: impl UriInput) -> Result<bool> {
        Ok(origin::is_cross_origin(&self.uri, &other.into_uri()?))
    }
}

impl From<Uri> for BaseUri {
    fn from(uri: Uri) -> Self {
        Self::from_uri(uri)
    }
}

impl From<BaseUri> for Uri {
    fn from(base: BaseUri) -> Self {
        base.uri
    }
}

impl AsRef<Uri> for BaseUri {
    fn as_ref(&self) -> &Uri {
        &self.uri
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uri, f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BaseUri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.uri, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BaseUri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        <Uri as serde::Deserialize>::deserialize(deserializer).map(Self::from_uri)
    }
}
