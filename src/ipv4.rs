/// IPv4 address parser for the RFC 3986 `IPv4address` rule
use crate::compat::{String, ToString, format};
use crate::error::{Error, Result};

/// Parse a dotted-decimal IPv4 address into a u32.
///
/// Only the strict form is accepted: exactly four `dec-octet` parts,
/// no leading zeros, no hexadecimal or octal notation. Anything else is
/// a registered name as far as RFC 3986 is concerned.
pub fn parse_ipv4(input: &str) -> Result<u32> {
    let invalid = || Error::InvalidIpv4(input.to_string());

    let mut ipv4: u32 = 0;
    let mut count = 0;
    for part in input.split('.') {
        count += 1;
        if count > 4 {
            return Err(invalid());
        }
        ipv4 = (ipv4 << 8) | u32::from(parse_dec_octet(part).ok_or_else(invalid)?);
    }

    if count != 4 {
        return Err(invalid());
    }

    Ok(ipv4)
}

/// Parse a single `dec-octet`.
fn parse_dec_octet(part: &str) -> Option<u8> {
    let bytes = part.as_bytes();
    if bytes.is_empty() || bytes.len() > 3 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    // "0" is fine, "00" or "01" is not
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    part.parse::<u8>().ok()
}

/// Serialize an IPv4 address (u32) to dotted decimal notation
pub fn serialize_ipv4(ipv4: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (ipv4 >> 24) & 0xFF,
        (ipv4 >> 16) & 0xFF,
        (ipv4 >> 8) & 0xFF,
        ipv4 & 0xFF
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreadable_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_decimal() {
        assert_eq!(parse_ipv4("192.168.1.1").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), 0x7F000001);
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), 0);
        assert_eq!(parse_ipv4("255.255.255.255").unwrap(), 0xFFFFFFFF);
    }

    #[test]
    fn test_parse_ipv4_rejects_whatwg_forms() {
        assert!(parse_ipv4("0xC0A80101").is_err());
        assert!(parse_ipv4("0300.0250.01.01").is_err());
        assert!(parse_ipv4("192.168.1").is_err());
        assert!(parse_ipv4("192.168.1.1.").is_err());
        assert!(parse_ipv4("1.2.3.256").is_err());
        assert!(parse_ipv4("1.2.3.4.5").is_err());
        assert!(parse_ipv4("").is_err());
    }

    #[test]
    fn test_serialize_ipv4() {
        assert_eq!(serialize_ipv4(0xC0A80101), "192.168.1.1");
        assert_eq!(serialize_ipv4(0x7F000001), "127.0.0.1");
    }
}
