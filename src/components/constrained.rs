use super::UriComponent;
use crate::character_sets::is_forbidden_control;
use crate::checkers::is_valid_scheme;
use crate::compat::{Cow, String, ToString, format};
use crate::error::{Error, Result};
use crate::scheme::get_scheme_type;
use crate::types::SchemeType;
use crate::unicode::percent_encode::{
    C0_CONTROL_SET, FRAGMENT_SET, PASS_SET, PATH_SET, QUERY_SET, USERINFO_SET, decode_unreserved,
    percent_encode_with_set,
};
use crate::uri::Uri;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;
use percent_encoding::AsciiSet;

mod sealed {
    pub trait Sealed {}
}

/// Rules applied by a [`Constrained`] string for one URI component.
pub trait ComponentKind:
    sealed::Sealed + Copy + Default + fmt::Debug + Eq + Hash + Send + Sync + 'static
{
    /// Characters percent-encoded when the component is serialized
    const ENCODE_SET: &'static AsciiSet;
    /// Characters rejected when they appear unencoded
    const FORBIDDEN: &'static [u8];
    const CASE_INSENSITIVE: bool = false;
    /// Delimiter written before the value inside a URI
    const PREFIX: &'static str = "";
    /// Delimiter written after the value inside a URI
    const SUFFIX: &'static str = "";

    /// Grammar check run on the raw input
    fn is_valid(_value: &str) -> bool {
        true
    }

    fn error(value: &str) -> Error;

    /// The component of this kind held by `uri`
    fn select(uri: &Uri) -> &Constrained<Self>;
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SchemeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UserKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PassKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PathKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QueryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FragmentKind;

impl sealed::Sealed for SchemeKind {}
impl sealed::Sealed for UserKind {}
impl sealed::Sealed for PassKind {}
impl sealed::Sealed for PathKind {}
impl sealed::Sealed for QueryKind {}
impl sealed::Sealed for FragmentKind {}

impl ComponentKind for SchemeKind {
    const ENCODE_SET: &'static AsciiSet = C0_CONTROL_SET;
    const FORBIDDEN: &'static [u8] = b"";
    const CASE_INSENSITIVE: bool = true;
    const SUFFIX: &'static str = ":";

    fn is_valid(value: &str) -> bool {
        is_valid_scheme(value)
    }

    fn error(value: &str) -> Error {
        Error::InvalidScheme(value.to_string())
    }

    fn select(uri: &Uri) -> &Constrained<Self> {
        uri.scheme()
    }
}

impl ComponentKind for UserKind {
    const ENCODE_SET: &'static AsciiSet = USERINFO_SET;
    const FORBIDDEN: &'static [u8] = b"/:@?#";

    fn error(value: &str) -> Error {
        Error::InvalidUserInfo(value.to_string())
    }

    fn select(uri: &Uri) -> &Constrained<Self> {
        &uri.user_info().user
    }
}

impl ComponentKind for PassKind {
    const ENCODE_SET: &'static AsciiSet = PASS_SET;
    const FORBIDDEN: &'static [u8] = b"@/?#";
    const PREFIX: &'static str = ":";

    fn error(value: &str) -> Error {
        Error::InvalidUserInfo(value.to_string())
    }

    fn select(uri: &Uri) -> &Constrained<Self> {
        &uri.user_info().pass
    }
}

impl ComponentKind for PathKind {
    const ENCODE_SET: &'static AsciiSet = PATH_SET;
    const FORBIDDEN: &'static [u8] = b"";

    fn error(value: &str) -> Error {
        Error::InvalidPath(value.to_string())
    }

    fn select(uri: &Uri) -> &Constrained<Self> {
        &uri.path().0
    }
}

impl ComponentKind for QueryKind {
    const ENCODE_SET: &'static AsciiSet = QUERY_SET;
    const FORBIDDEN: &'static [u8] = b"";
    const PREFIX: &'static str = "?";

    fn error(value: &str) -> Error {
        Error::InvalidUri(format!("?{value}"))
    }

    fn select(uri: &Uri) -> &Constrained<Self> {
        uri.query()
    }
}

impl ComponentKind for FragmentKind {
    const ENCODE_SET: &'static AsciiSet = FRAGMENT_SET;
    const FORBIDDEN: &'static [u8] = b"";
    const PREFIX: &'static str = "#";

    fn error(value: &str) -> Error {
        Error::InvalidUri(format!("#{value}"))
    }

    fn select(uri: &Uri) -> &Constrained<Self> {
        uri.fragment()
    }
}

/// An optional string restricted by the rules of a [`ComponentKind`].
///
/// The value is stored percent-decoded wherever decoding keeps its meaning
/// (unreserved characters and UTF-8 sequences). Reserved characters stay
/// encoded. Encoding back happens on serialization only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Constrained<K: ComponentKind> {
    value: Option<String>,
    kind: PhantomData<K>,
}

/// URI scheme, always lower-cased
pub type Scheme = Constrained<SchemeKind>;
/// User part of the user information
pub type User = Constrained<UserKind>;
/// Password part of the user information
pub type Pass = Constrained<PassKind>;
pub type Query = Constrained<QueryKind>;
pub type Fragment = Constrained<FragmentKind>;

impl<K: ComponentKind> Constrained<K> {
    /// Validates and stores a component. `None` is the absent component.
    ///
    /// # Errors
    ///
    /// Returns the kind's syntax error if the value contains a control
    /// character, a forbidden character or fails the kind's grammar.
    pub fn new(value: Option<&str>) -> Result<Self> {
        let Some(value) = value else {
            return Ok(Self::absent());
        };

        if value
            .bytes()
            .any(|b| is_forbidden_control(b) || K::FORBIDDEN.contains(&b))
            || !K::is_valid(value)
        {
            tracing::debug!(value, "rejected URI component");
            return Err(K::error(value));
        }

        let decoded = decode_unreserved(value);
        let stored = if K::CASE_INSENSITIVE {
            decoded.to_lowercase()
        } else {
            decoded.into_owned()
        };

        Ok(Self::from_stored(Some(stored)))
    }

    pub const fn absent() -> Self {
        Self {
            value: None,
            kind: PhantomData,
        }
    }

    /// Wraps a value that is already in stored form.
    pub(crate) fn from_stored(value: Option<String>) -> Self {
        Self {
            value,
            kind: PhantomData,
        }
    }

    /// Copy of the component held by `uri`
    pub fn from_uri(uri: &Uri) -> Self {
        K::select(uri).clone()
    }

    /// The stored value: decoded where decoding keeps the meaning
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Check if the component is absent or empty
    pub fn is_empty(&self) -> bool {
        self.value.as_deref().is_none_or(str::is_empty)
    }

    /// The value as it appears in a URI, without delimiters
    pub fn encoded(&self) -> Option<Cow<'_, str>> {
        self.value
            .as_deref()
            .map(|value| percent_encode_with_set(value, K::ENCODE_SET))
    }
}

impl Scheme {
    pub(crate) fn scheme_type(&self) -> SchemeType {
        self.value().map_or(SchemeType::Other, get_scheme_type)
    }
}

impl<K: ComponentKind> UriComponent for Constrained<K> {
    fn to_encoded(&self) -> Option<Cow<'_, str>> {
        self.encoded()
    }

    fn uri_component(&self) -> String {
        match self.encoded() {
            Some(value) => format!("{}{value}{}", K::PREFIX, K::SUFFIX),
            None => String::new(),
        }
    }

    fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

impl<K: ComponentKind> fmt::Display for Constrained<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded().unwrap_or_default())
    }
}
