mod state;

pub use state::State;

use crate::base_uri::BaseUri;
use crate::character_sets::is_forbidden_control;
use crate::checkers::{is_valid_scheme, parse_port};
use crate::compat::{Cow, String, ToString};
use crate::error::{Error, Result};
use crate::uri::Uri;
use crate::uri_components::UriComponents;

/// Trait for values that can be used where a URI is expected
pub trait UriInput {
    /// Parse or convert into a [`Uri`]
    ///
    /// # Errors
    ///
    /// Returns an error if the value is a string that is not a valid URI.
    fn into_uri(self) -> Result<Uri>;
}

impl UriInput for &str {
    fn into_uri(self) -> Result<Uri> {
        Uri::parse(self)
    }
}

impl UriInput for &String {
    fn into_uri(self) -> Result<Uri> {
        Uri::parse(self)
    }
}

impl UriInput for String {
    fn into_uri(self) -> Result<Uri> {
        Uri::parse(&self)
    }
}

impl UriInput for Uri {
    fn into_uri(self) -> Result<Uri> {
        Ok(self)
    }
}

impl UriInput for &Uri {
    fn into_uri(self) -> Result<Uri> {
        Ok(self.clone())
    }
}

impl UriInput for BaseUri {
    fn into_uri(self) -> Result<Uri> {
        Ok(BaseUri::into_uri(self))
    }
}

impl UriInput for &BaseUri {
    fn into_uri(self) -> Result<Uri> {
        Ok(self.uri().clone())
    }
}

/// The state following a path or a query
fn state_after(rest: &str) -> State {
    match rest.as_bytes().first() {
        Some(b'?') => State::Query,
        Some(b'#') => State::Fragment,
        _ => State::Done,
    }
}

/// Split a URI reference into its raw components in a single pass.
///
/// Components are borrowed from the input and not validated beyond what is
/// needed to find their boundaries: the scheme grammar, the IP literal
/// brackets and the port digits.
///
/// # Errors
///
/// Returns an error for control characters, an empty or invalid scheme,
/// an unterminated IP literal or an invalid port.
pub fn parse_components(input: &str) -> Result<UriComponents<'_>> {
    if input.bytes().any(is_forbidden_control) {
        tracing::debug!(input, "control character in URI");
        return Err(Error::InvalidUri(input.to_string()));
    }

    let mut components = UriComponents::new();
    let mut rest = input;
    let mut state = State::SchemeStart;

    loop {
        match state {
            State::SchemeStart => {
                let bytes = rest.as_bytes();
                let delimiter = memchr::memchr3(b'/', b'?', b'#', bytes).unwrap_or(bytes.len());
                if let Some(colon) = memchr::memchr(b':', &bytes[..delimiter]) {
                    let scheme = &rest[..colon];
                    if !is_valid_scheme(scheme) {
                        tracing::debug!(input, scheme, "invalid scheme");
                        return Err(Error::InvalidScheme(scheme.to_string()));
                    }
                    components.scheme = Some(Cow::Borrowed(scheme));
                    rest = &rest[colon + 1..];
                }
                state = State::AuthorityOrPath;
            }
            State::AuthorityOrPath => {
                if let Some(after) = rest.strip_prefix("//") {
                    rest = after;
                    state = State::Authority;
                } else {
                    state = State::Path;
                }
            }
            State::Authority => {
                let bytes = rest.as_bytes();
                let end = memchr::memchr3(b'/', b'?', b'#', bytes).unwrap_or(bytes.len());
                parse_authority(&rest[..end], &mut components)?;
                rest = &rest[end..];
                state = State::Path;
            }
            State::Path => {
                let end = memchr::memchr2(b'?', b'#', rest.as_bytes()).unwrap_or(rest.len());
                components.path = Cow::Borrowed(&rest[..end]);
                rest = &rest[end..];
                state = state_after(rest);
            }
            State::Query => {
                let query = &rest[1..];
                let end = memchr::memchr(b'#', query.as_bytes()).unwrap_or(query.len());
                components.query = Some(Cow::Borrowed(&query[..end]));
                rest = &query[end..];
                state = state_after(rest);
            }
            State::Fragment => {
                components.fragment = Some(Cow::Borrowed(&rest[1..]));
                state = State::Done;
            }
            State::Done => return Ok(components),
        }
    }
}

/// Split `[ userinfo "@" ] host [ ":" port ]`
fn parse_authority<'a>(authority: &'a str, components: &mut UriComponents<'a>) -> Result<()> {
    let bytes = authority.as_bytes();

    // userinfo runs up to the last "@"
    let host_port = match memchr::memrchr(b'@', bytes) {
        Some(at) => {
            let user_info = &authority[..at];
            match user_info.split_once(':') {
                Some((user, pass)) => {
                    components.user = Some(Cow::Borrowed(user));
                    components.pass = Some(Cow::Borrowed(pass));
                }
                None => components.user = Some(Cow::Borrowed(user_info)),
            }
            &authority[at + 1..]
        }
        None => authority,
    };

    let (host, port) = if host_port.starts_with('[') {
        let Some(close) = memchr::memchr(b']', host_port.as_bytes()) else {
            tracing::debug!(authority, "unterminated IP literal");
            return Err(Error::InvalidHost(host_port.to_string()));
        };
        let (host, after) = host_port.split_at(close + 1);
        if after.is_empty() {
            (host, None)
        } else {
            let port = after
                .strip_prefix(':')
                .ok_or_else(|| Error::InvalidHost(host_port.to_string()))?;
            (host, Some(port))
        }
    } else {
        match memchr::memrchr(b':', host_port.as_bytes()) {
            Some(colon) => (&host_port[..colon], Some(&host_port[colon + 1..])),
            None => (host_port, None),
        }
    };

    components.host = Some(Cow::Borrowed(host));
    components.port = match port {
        None | Some("") => None,
        Some(port) => Some(parse_port(port).ok_or_else(|| {
            tracing::debug!(authority, port, "invalid port");
            Error::InvalidPort(port.to_string())
        })?),
    };

    Ok(())
}
