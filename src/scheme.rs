use crate::types::SchemeType;

/// Get the scheme type from a lower-cased scheme string.
/// Uses perfect hash based on length + first byte to minimize comparisons.
pub fn get_scheme_type(scheme: &str) -> SchemeType {
    let bytes = scheme.as_bytes();

    // Perfect hash: filter by length first, then first byte, then full comparison
    match (bytes.len(), bytes.first()) {
        (2, Some(b'w')) if bytes == b"ws" => SchemeType::Ws,
        (3, Some(b'w')) if bytes == b"wss" => SchemeType::Wss,
        (3, Some(b'f')) if bytes == b"ftp" => SchemeType::Ftp,
        (3, Some(b's')) if bytes == b"ssh" => SchemeType::Ssh,
        (4, Some(b'h')) if bytes == b"http" => SchemeType::Http,
        (4, Some(b'f')) if bytes == b"ftps" => SchemeType::Ftps,
        (4, Some(b'l')) if bytes == b"ldap" => SchemeType::Ldap,
        (5, Some(b'h')) if bytes == b"https" => SchemeType::Https,
        (5, Some(b'l')) if bytes == b"ldaps" => SchemeType::Ldaps,
        _ => SchemeType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_type() {
        assert_eq!(get_scheme_type("http"), SchemeType::Http);
        assert_eq!(get_scheme_type("https"), SchemeType::Https);
        assert_eq!(get_scheme_type("ftp"), SchemeType::Ftp);
        assert_eq!(get_scheme_type("ldaps"), SchemeType::Ldaps);
        assert_eq!(get_scheme_type("file"), SchemeType::Other);
        assert_eq!(get_scheme_type("custom"), SchemeType::Other);
    }

    #[test]
    fn test_standard_ports() {
        assert!(SchemeType::Ftps.is_standard_port(989));
        assert!(SchemeType::Ftps.is_standard_port(990));
        assert!(SchemeType::Wss.is_standard_port(443));
        assert!(!SchemeType::Other.is_standard_port(80));
    }

    #[test]
    fn test_special_schemes() {
        assert!(SchemeType::Ws.is_special());
        assert!(SchemeType::Ftp.is_special());
        assert!(!SchemeType::Ftps.is_special());
        assert!(!SchemeType::Ldap.is_special());
        assert!(!SchemeType::Other.is_special());
    }
}
