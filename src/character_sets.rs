/// RFC 3986 character classes, one bit per class
pub const UNRESERVED: u8 = 0x01;
pub const SUB_DELIM: u8 = 0x02;
pub const GEN_DELIM: u8 = 0x04;
pub const SCHEME: u8 = 0x08;
pub const HEXDIG: u8 = 0x10;

/// Character classification table indexed by byte value.
/// Non-ASCII bytes carry no class.
const CHAR_CLASS_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];

    let mut i = b'a';
    while i <= b'z' {
        table[i as usize] = UNRESERVED | SCHEME;
        i += 1;
    }
    let mut i = b'A';
    while i <= b'Z' {
        table[i as usize] = UNRESERVED | SCHEME;
        i += 1;
    }
    let mut i = b'0';
    while i <= b'9' {
        table[i as usize] = UNRESERVED | SCHEME | HEXDIG;
        i += 1;
    }
    let mut i = b'a';
    while i <= b'f' {
        table[i as usize] |= HEXDIG;
        table[(i - 32) as usize] |= HEXDIG;
        i += 1;
    }

    table[b'-' as usize] = UNRESERVED | SCHEME;
    table[b'.' as usize] = UNRESERVED | SCHEME;
    table[b'_' as usize] = UNRESERVED;
    table[b'~' as usize] = UNRESERVED;
    table[b'+' as usize] = SUB_DELIM | SCHEME;

    // sub-delims
    table[b'!' as usize] = SUB_DELIM;
    table[b'$' as usize] = SUB_DELIM;
    table[b'&' as usize] = SUB_DELIM;
    table[b'\'' as usize] = SUB_DELIM;
    table[b'(' as usize] = SUB_DELIM;
    table[b')' as usize] = SUB_DELIM;
    table[b'*' as usize] = SUB_DELIM;
    table[b',' as usize] = SUB_DELIM;
    table[b';' as usize] = SUB_DELIM;
    table[b'=' as usize] = SUB_DELIM;

    // gen-delims
    table[b':' as usize] = GEN_DELIM;
    table[b'/' as usize] = GEN_DELIM;
    table[b'?' as usize] = GEN_DELIM;
    table[b'#' as usize] = GEN_DELIM;
    table[b'[' as usize] = GEN_DELIM;
    table[b']' as usize] = GEN_DELIM;
    table[b'@' as usize] = GEN_DELIM;

    table
};

/// Check whether a byte belongs to any of the given classes
pub fn is_in_class(b: u8, class: u8) -> bool {
    CHAR_CLASS_TABLE[b as usize] & class != 0
}

pub fn is_unreserved(b: u8) -> bool {
    is_in_class(b, UNRESERVED)
}

pub fn is_scheme_char(b: u8) -> bool {
    is_in_class(b, SCHEME)
}

pub fn is_hex_digit(b: u8) -> bool {
    is_in_class(b, HEXDIG)
}

/// Check if a byte is a C0 control or DEL, which may never appear in a URI string
pub fn is_forbidden_control(b: u8) -> bool {
    b < 0x20 || b == 0x7F
}

/// Registered-name label byte: unreserved (without `.`), sub-delims or `%`
pub fn is_reg_name_label_byte(b: u8) -> bool {
    b != b'.' && (is_in_class(b, UNRESERVED | SUB_DELIM) || b == b'%')
}
