use crate::character_sets::{SUB_DELIM, UNRESERVED, is_hex_digit, is_in_class, is_scheme_char};

/// Check a scheme against `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub fn is_valid_scheme(scheme: &str) -> bool {
    let bytes = scheme.as_bytes();
    let Some((&first, rest)) = bytes.split_first() else {
        return false;
    };
    first.is_ascii_alphabetic() && rest.iter().all(|&b| is_scheme_char(b))
}

/// Parse a port string to u16.
/// Returns None if empty, contains non-digit characters, or is out of range.
pub fn parse_port(port: &str) -> Option<u16> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse::<u16>().ok()
}

/// Check an `IPvFuture` literal (without brackets): `"v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
pub fn is_ip_future(input: &str) -> bool {
    let Some(rest) = input.strip_prefix(['v', 'V']) else {
        return false;
    };
    let Some((version, address)) = rest.split_once('.') else {
        return false;
    };
    !version.is_empty()
        && version.bytes().all(is_hex_digit)
        && !address.is_empty()
        && address
            .bytes()
            .all(|b| b == b':' || is_in_class(b, UNRESERVED | SUB_DELIM))
}

/// Check a zone identifier (RFC 6874): `1*( unreserved / pct-encoded )`
pub fn is_zone_id(zone: &str) -> bool {
    let bytes = zone.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !is_hex_digit(bytes[i + 1])
                || !is_hex_digit(bytes[i + 2])
            {
                return false;
            }
            i += 3;
        } else if is_in_class(bytes[i], UNRESERVED) {
            i += 1;
        } else {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_scheme() {
        assert!(is_valid_scheme("http"));
        assert!(is_valid_scheme("a"));
        assert!(is_valid_scheme("coap+tcp"));
        assert!(is_valid_scheme("HtTps"));
        assert!(!is_valid_scheme(""));
        assert!(!is_valid_scheme("123"));
        assert!(!is_valid_scheme("in,valid"));
        assert!(!is_valid_scheme("+a"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("80"), Some(80));
        assert_eq!(parse_port("8080"), Some(8080));
        assert_eq!(parse_port("443"), Some(443));
        assert_eq!(parse_port("65535"), Some(65535));
        assert_eq!(parse_port("65536"), None); // Out of range
        assert_eq!(parse_port("abc"), None);
        assert_eq!(parse_port("-1"), None);
        assert_eq!(parse_port(""), None);
    }

    #[test]
    fn test_is_ip_future() {
        assert!(is_ip_future("v1.fe80::a+en1"));
        assert!(is_ip_future("VF.abc"));
        assert!(!is_ip_future("v.abc"));
        assert!(!is_ip_future("v1."));
        assert!(!is_ip_future("1.abc"));
    }

    #[test]
    fn test_is_zone_id() {
        assert!(is_zone_id("eth0"));
        assert!(is_zone_id("en%201"));
        assert!(!is_zone_id(""));
        assert!(!is_zone_id("en%2"));
        assert!(!is_zone_id("a/b"));
    }
}
