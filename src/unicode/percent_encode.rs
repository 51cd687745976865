use crate::character_sets::{is_hex_digit, is_unreserved};
use crate::compat::{Cow, String, ToString, Vec};
use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// Encode sets follow the RFC 3986 component grammars.
// `%` is never part of a set: valid triplets are kept, stray `%` are
// escaped by `percent_encode_into` itself.

/// C0 control percent-encode set
pub const C0_CONTROL_SET: &AsciiSet = CONTROLS;

/// Characters that may never appear literally anywhere in a URI
pub const EXCLUDED_SET: &AsciiSet = &C0_CONTROL_SET
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Fragment percent-encode set
/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT_SET: &AsciiSet = &EXCLUDED_SET.add(b'#').add(b'[').add(b']');

/// Query percent-encode set, same grammar as the fragment
pub const QUERY_SET: &AsciiSet = FRAGMENT_SET;

/// Path percent-encode set
/// `path = *( pchar / "/" )`
pub const PATH_SET: &AsciiSet = &FRAGMENT_SET.add(b'?');

/// Password percent-encode set
/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const PASS_SET: &AsciiSet = &PATH_SET.add(b'/').add(b'@');

/// User percent-encode set: password set plus the user/password separator
pub const USERINFO_SET: &AsciiSet = &PASS_SET.add(b':');

/// Decode a `%XX` triplet starting at `pos`.
fn decode_triplet(bytes: &[u8], pos: usize) -> Option<u8> {
    match bytes.get(pos..pos + 3) {
        Some(&[b'%', hi, lo]) if is_hex_digit(hi) && is_hex_digit(lo) => {
            Some((hex_value(hi) << 4) | hex_value(lo))
        }
        _ => None,
    }
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

fn push_upper_triplets(buffer: &mut String, triplets: &str) {
    buffer.extend(triplets.chars().map(|c| c.to_ascii_uppercase()));
}

/// Decode every triplet whose decoding does not change the meaning of a
/// component: unreserved ASCII and well-formed UTF-8 sequences.
/// Other triplets are kept with upper-case hex digits and a `%` that
/// starts no triplet is stored as `%25`.
pub fn decode_unreserved(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let Some(first) = memchr::memchr(b'%', bytes) else {
        return Cow::Borrowed(input);
    };

    let mut result = String::with_capacity(input.len());
    result.push_str(&input[..first]);
    let mut i = first;

    while i < bytes.len() {
        match decode_triplet(bytes, i) {
            Some(b) if is_unreserved(b) => {
                result.push(b as char);
                i += 3;
            }
            Some(b) if b >= 0x80 => {
                let start = i;
                let mut run = Vec::new();
                while let Some(b) = decode_triplet(bytes, i).filter(|&b| b >= 0x80) {
                    run.push(b);
                    i += 3;
                }
                match core::str::from_utf8(&run) {
                    Ok(decoded) => result.push_str(decoded),
                    Err(_) => push_upper_triplets(&mut result, &input[start..i]),
                }
            }
            Some(_) => {
                push_upper_triplets(&mut result, &input[i..i + 3]);
                i += 3;
            }
            None if bytes[i] == b'%' => {
                result.push_str("%25");
                i += 1;
            }
            None => {
                let end = memchr::memchr(b'%', &bytes[i..]).map_or(bytes.len(), |pos| i + pos);
                result.push_str(&input[i..end]);
                i = end;
            }
        }
    }

    Cow::Owned(result)
}

/// Write a percent-encoded string to buffer, keeping valid `%XX` triplets
/// as they are and escaping any other `%`
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    // Reserve space to reduce reallocations
    buffer.reserve(input.len());

    let bytes = input.as_bytes();
    let mut start = 0;
    for pos in memchr::memchr_iter(b'%', bytes) {
        for chunk in utf8_percent_encode(&input[start..pos], encode_set) {
            buffer.push_str(chunk);
        }
        if decode_triplet(bytes, pos).is_some() {
            buffer.push('%');
        } else {
            buffer.push_str("%25");
        }
        start = pos + 1;
    }
    for chunk in utf8_percent_encode(&input[start..], encode_set) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode a string using the provided encode set
pub fn percent_encode_with_set<'a>(
    input: &'a str,
    encode_set: &'static AsciiSet,
) -> Cow<'a, str> {
    if memchr::memchr(b'%', input.as_bytes()).is_none() {
        return utf8_percent_encode(input, encode_set).into();
    }
    let mut buffer = String::new();
    percent_encode_into(&mut buffer, input, encode_set);
    Cow::Owned(buffer)
}

/// Decode percent-encoded string
pub fn percent_decode(input: &str) -> Result<String> {
    percent_encoding::percent_decode_str(input)
        .decode_utf8()
        .map(Into::into)
        .map_err(|_| Error::InvalidPercentEncoding(input.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("hello%20world").unwrap(), "hello world");
        assert_eq!(percent_decode("test").unwrap(), "test");
        assert_eq!(percent_decode("%2F").unwrap(), "/");
        assert_eq!(percent_decode("%C3%A9").unwrap(), "é");
        assert!(percent_decode("%FF").is_err());
    }

    #[test]
    fn test_decode_unreserved() {
        assert_eq!(decode_unreserved("plain"), "plain");
        assert_eq!(decode_unreserved("%7efoo"), "~foo");
        assert_eq!(decode_unreserved("%41%2f%2F"), "A%2F%2F");
        assert_eq!(decode_unreserved("a%26b"), "a%26b");
        assert_eq!(decode_unreserved("caf%C3%A9"), "café");
        assert_eq!(decode_unreserved("%ff%41"), "%FFA");
        assert_eq!(decode_unreserved("100%"), "100%25");
        assert_eq!(decode_unreserved("%X%"), "%25X%25");
        assert_eq!(decode_unreserved("%%4142"), "%25A42");
    }

    #[test]
    fn test_percent_encode_keeps_triplets() {
        assert_eq!(percent_encode_with_set("/a b", PATH_SET), "/a%20b");
        assert_eq!(percent_encode_with_set("/a%2Fb", PATH_SET), "/a%2Fb");
        assert_eq!(percent_encode_with_set("100%", PATH_SET), "100%25");
        assert_eq!(percent_encode_with_set("%X%", PATH_SET), "%25X%25");
        assert_eq!(percent_encode_with_set("/é", PATH_SET), "/%C3%A9");
        assert_eq!(percent_encode_with_set("a?b#c", PATH_SET), "a%3Fb%23c");
        assert_eq!(percent_encode_with_set("a?b#c", QUERY_SET), "a?b%23c");
    }

    #[test]
    fn test_userinfo_sets() {
        assert_eq!(percent_encode_with_set("a:b@c", USERINFO_SET), "a%3Ab%40c");
        assert_eq!(percent_encode_with_set("a:b@c", PASS_SET), "a:b%40c");
    }

    #[test]
    fn test_borrowed_when_clean() {
        assert!(matches!(
            percent_encode_with_set("/a/b", PATH_SET),
            Cow::Borrowed(_)
        ));
    }
}
