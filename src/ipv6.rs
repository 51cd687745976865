/// IPv6 literal parsing for the RFC 3986 `IPv6address` rule, and
/// RFC 5952 text representation
use crate::compat::{String, ToString, Vec};
use crate::error::{Error, Result};
use crate::ipv4::parse_ipv4;
use core::fmt::Write;

/// The eight 16-bit pieces of an IPv6 address
pub type Ipv6Segments = [u16; 8];

fn invalid(input: &str) -> Error {
    Error::InvalidIpv6(input.to_string())
}

/// Parse an IPv6 address without brackets or zone identifier,
/// e.g. "`::1`", "`2001:db8::1`" or "`::ffff:192.0.2.1`".
pub fn parse_ipv6(input: &str) -> Result<Ipv6Segments> {
    let mut segments: Ipv6Segments = [0; 8];

    // A trailing dotted quad (`ls32`) fills the last two pieces
    let last_colon = input.rfind(':').ok_or_else(|| invalid(input))?;
    let tail = &input[last_colon + 1..];
    let (hex_part, hex_count) = if tail.contains('.') {
        let ipv4 = parse_ipv4(tail).map_err(|_| invalid(input))?;
        segments[6] = (ipv4 >> 16) as u16;
        segments[7] = ipv4 as u16;
        // "::" right before the dotted quad keeps both colons
        let end = if input[..last_colon].ends_with(':') {
            last_colon + 1
        } else {
            last_colon
        };
        (&input[..end], 6)
    } else {
        (input, 8)
    };

    let expanded = expand(hex_part, hex_count).ok_or_else(|| invalid(input))?;
    segments[..hex_count].copy_from_slice(&expanded);
    Ok(segments)
}

/// Expand the hex part into exactly `count` pieces, filling a `::` gap
/// with zeros. A `::` must stand for at least one piece.
fn expand(input: &str, count: usize) -> Option<Vec<u16>> {
    let Some((head, rest)) = input.split_once("::") else {
        let pieces = pieces(input)?;
        return (pieces.len() == count).then_some(pieces);
    };
    if rest.contains("::") {
        return None;
    }

    let head = pieces(head)?;
    let rest = pieces(rest)?;
    if head.len() + rest.len() >= count {
        return None;
    }

    let mut expanded = head;
    expanded.resize(count - rest.len(), 0);
    expanded.extend(rest);
    Some(expanded)
}

/// Colon-separated `h16` pieces. The empty string has none.
fn pieces(input: &str) -> Option<Vec<u16>> {
    if input.is_empty() {
        return Some(Vec::new());
    }
    input
        .split(':')
        .map(|piece| {
            if piece.is_empty() || piece.len() > 4 || !piece.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return None;
            }
            u16::from_str_radix(piece, 16).ok()
        })
        .collect()
}

/// Write an IPv6 address in RFC 5952 form, without brackets: lower-case
/// hex, no leading zeros, the first longest run of two or more zero pieces
/// replaced by `::`.
pub fn serialize_ipv6(segments: &Ipv6Segments) -> String {
    let gap = longest_zero_run(segments).filter(|run| run.len() > 1);

    let mut result = String::with_capacity(39);
    let mut i = 0;
    while i < segments.len() {
        if let Some(run) = gap.as_ref()
            && run.start == i
        {
            result.push_str("::");
            i = run.end;
            continue;
        }
        if i > 0 && !result.ends_with(':') {
            result.push(':');
        }
        let _ = write!(result, "{:x}", segments[i]);
        i += 1;
    }
    result
}

fn longest_zero_run(segments: &Ipv6Segments) -> Option<core::ops::Range<usize>> {
    let mut best: Option<core::ops::Range<usize>> = None;
    let mut start = None;

    for i in 0..=segments.len() {
        match (segments.get(i).copied(), start) {
            (Some(0), None) => start = Some(i),
            (Some(0), Some(_)) => {}
            (_, Some(s)) => {
                if best.as_ref().is_none_or(|run| i - s > run.len()) {
                    best = Some(s..i);
                }
                start = None;
            }
            (_, None) => {}
        }
    }
    best
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv6() {
        assert_eq!(parse_ipv6("::1").unwrap(), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(parse_ipv6("::").unwrap(), [0; 8]);
        assert_eq!(
            parse_ipv6("2001:db8:0:0:1:0:0:1").unwrap(),
            [0x2001, 0xdb8, 0, 0, 1, 0, 0, 1]
        );
        assert_eq!(
            parse_ipv6("2001:DB8::1").unwrap(),
            [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(parse_ipv6("1::").unwrap(), [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_ipv6_with_ipv4() {
        assert_eq!(
            parse_ipv6("::127.0.0.1").unwrap(),
            [0, 0, 0, 0, 0, 0, 0x7f00, 0x0001]
        );
        assert_eq!(
            parse_ipv6("::ffff:192.168.1.1").unwrap(),
            [0, 0, 0, 0, 0, 0xffff, 0xc0a8, 0x0101]
        );
        assert_eq!(
            parse_ipv6("64:ff9b::192.0.2.33").unwrap(),
            [0x64, 0xff9b, 0, 0, 0, 0, 0xc000, 0x0221]
        );
        assert_eq!(
            parse_ipv6("1:2:3:4:5:6:1.2.3.4").unwrap(),
            [1, 2, 3, 4, 5, 6, 0x0102, 0x0304]
        );
    }

    #[test]
    fn test_parse_ipv6_invalid() {
        for input in [
            "",
            ":",
            ":::",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8:9",
            "1:2:3:4:5:6:7::8",
            "1::2::3",
            "12345::",
            "+1::",
            "g::",
            "::1.2.3",
            "::01.2.3.4",
            "1:2:3:4:5:6:7:1.2.3.4",
            "fe80::1%25eth0",
        ] {
            assert!(parse_ipv6(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_serialize_ipv6() {
        assert_eq!(serialize_ipv6(&[0, 0, 0, 0, 0, 0, 0, 1]), "::1");
        assert_eq!(serialize_ipv6(&[0; 8]), "::");
        assert_eq!(
            serialize_ipv6(&[0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]),
            "2001:db8::1"
        );
        assert_eq!(
            serialize_ipv6(&[0x2001, 0xdb8, 0, 1, 0, 0, 0, 1]),
            "2001:db8:0:1::1"
        );
        assert_eq!(
            serialize_ipv6(&[1, 0, 0, 2, 0, 0, 3, 4]),
            "1::2:0:0:3:4"
        );
        assert_eq!(serialize_ipv6(&[1, 0, 2, 3, 4, 5, 6, 7]), "1:0:2:3:4:5:6:7");
    }
}
