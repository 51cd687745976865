//! Conversion between Unicode and ASCII-compatible domain names.
//!
//! Errors found during a conversion are accumulated as [`IdnaErrors`] flags
//! in the returned [`IdnaResult`] instead of aborting the conversion, so the
//! caller decides which of them are fatal.
//!
//! # Examples
//!
//! ```
//! use urival::idna::{self, IdnaErrors, IdnaOption};
//!
//! let result = idna::to_ascii("Bébé.BE", IdnaOption::for_idna2008_ascii()).unwrap();
//! assert_eq!(result.value(), "xn--bb-bjab.be");
//! assert!(!result.has_errors());
//!
//! let label = "a".repeat(64) + ".com";
//! let result = idna::to_ascii(&label, IdnaOption::for_idna2008_ascii()).unwrap();
//! assert!(result.errors().contains(IdnaErrors::LABEL_TOO_LONG));
//! ```

use crate::character_sets::{is_hex_digit, is_reg_name_label_byte};
use crate::compat::{String, ToString};
use crate::error::{Error, Result};
use crate::unicode::percent_encode::percent_decode;
use core::fmt;

const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

bitflags::bitflags! {
    /// Processing options, bit-compatible with the ICU `UIDNA_*` option set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IdnaOption: u32 {
        const ALLOW_UNASSIGNED = 0x01;
        const USE_STD3_RULES = 0x02;
        const CHECK_BIDI = 0x04;
        const CHECK_CONTEXTJ = 0x08;
        const NONTRANSITIONAL_TO_ASCII = 0x10;
        const NONTRANSITIONAL_TO_UNICODE = 0x20;
        const CHECK_CONTEXTO = 0x40;
    }
}

impl Default for IdnaOption {
    fn default() -> Self {
        Self::empty()
    }
}

impl IdnaOption {
    /// Options used when converting a host to its ASCII form.
    pub const fn for_idna2008_ascii() -> Self {
        Self::NONTRANSITIONAL_TO_ASCII
            .union(Self::CHECK_BIDI)
            .union(Self::USE_STD3_RULES)
            .union(Self::CHECK_CONTEXTJ)
    }

    /// Options used when converting a host to its Unicode form.
    pub const fn for_idna2008_unicode() -> Self {
        Self::NONTRANSITIONAL_TO_UNICODE
            .union(Self::CHECK_BIDI)
            .union(Self::USE_STD3_RULES)
            .union(Self::CHECK_CONTEXTJ)
    }

    #[must_use]
    pub const fn allow_unassigned(self) -> Self {
        self.union(Self::ALLOW_UNASSIGNED)
    }

    #[must_use]
    pub const fn disallow_unassigned(self) -> Self {
        self.difference(Self::ALLOW_UNASSIGNED)
    }

    #[must_use]
    pub const fn use_std3_rules(self) -> Self {
        self.union(Self::USE_STD3_RULES)
    }

    #[must_use]
    pub const fn prohibit_std3_rules(self) -> Self {
        self.difference(Self::USE_STD3_RULES)
    }

    #[must_use]
    pub const fn check_bidi(self) -> Self {
        self.union(Self::CHECK_BIDI)
    }

    #[must_use]
    pub const fn ignore_bidi(self) -> Self {
        self.difference(Self::CHECK_BIDI)
    }

    #[must_use]
    pub const fn check_contextj(self) -> Self {
        self.union(Self::CHECK_CONTEXTJ)
    }

    #[must_use]
    pub const fn ignore_contextj(self) -> Self {
        self.difference(Self::CHECK_CONTEXTJ)
    }

    #[must_use]
    pub const fn check_contexto(self) -> Self {
        self.union(Self::CHECK_CONTEXTO)
    }

    #[must_use]
    pub const fn ignore_contexto(self) -> Self {
        self.difference(Self::CHECK_CONTEXTO)
    }

    #[must_use]
    pub const fn nontransitional_to_ascii(self) -> Self {
        self.union(Self::NONTRANSITIONAL_TO_ASCII)
    }

    #[must_use]
    pub const fn transitional_to_ascii(self) -> Self {
        self.difference(Self::NONTRANSITIONAL_TO_ASCII)
    }

    #[must_use]
    pub const fn nontransitional_to_unicode(self) -> Self {
        self.union(Self::NONTRANSITIONAL_TO_UNICODE)
    }

    #[must_use]
    pub const fn transitional_to_unicode(self) -> Self {
        self.difference(Self::NONTRANSITIONAL_TO_UNICODE)
    }
}

bitflags::bitflags! {
    /// Conversion errors, bit-compatible with the ICU `UIDNA_ERROR_*` values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IdnaErrors: u32 {
        const EMPTY_LABEL = 0x0001;
        const LABEL_TOO_LONG = 0x0002;
        const DOMAIN_NAME_TOO_LONG = 0x0004;
        const LEADING_HYPHEN = 0x0008;
        const TRAILING_HYPHEN = 0x0010;
        const HYPHEN_3_4 = 0x0020;
        const LEADING_COMBINING_MARK = 0x0040;
        const DISALLOWED = 0x0080;
        const PUNYCODE = 0x0100;
        const LABEL_HAS_DOT = 0x0200;
        const INVALID_ACE_LABEL = 0x0400;
        const BIDI = 0x0800;
        const CONTEXTJ = 0x1000;
        const CONTEXTO_PUNCTUATION = 0x2000;
        const CONTEXTO_DIGITS = 0x4000;
    }
}

impl fmt::Display for IdnaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no error");
        }
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Outcome of an IDNA conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdnaResult {
    value: String,
    is_transitional_different: bool,
    errors: IdnaErrors,
}

impl IdnaResult {
    fn new(value: String, is_transitional_different: bool, errors: IdnaErrors) -> Self {
        Self {
            value,
            is_transitional_different,
            errors,
        }
    }

    /// The converted domain
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Whether transitional processing would have produced a different value
    pub fn is_transitional_different(&self) -> bool {
        self.is_transitional_different
    }

    pub fn errors(&self) -> IdnaErrors {
        self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_error(&self, error: IdnaErrors) -> bool {
        self.errors.intersects(error)
    }
}

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if domain contains Punycode (xn-- prefix, case insensitive)
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }

    // Check if starts with xn--
    if is_punycode_prefix(bytes) {
        return true;
    }

    // Check for .xn-- patterns using memchr for faster scanning
    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// Check an ASCII domain against the RFC 3986 `reg-name` grammar,
/// label by label.
fn is_registered_name(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            if i + 2 >= bytes.len() || !is_hex_digit(bytes[i + 1]) || !is_hex_digit(bytes[i + 2])
            {
                return false;
            }
            i += 3;
            continue;
        }
        if b != b'.' && !is_reg_name_label_byte(b) {
            return false;
        }
        i += 1;
    }
    true
}

/// Characters mapped differently by transitional and nontransitional processing
fn has_deviation_character(domain: &str) -> bool {
    domain
        .chars()
        .any(|c| matches!(c, '\u{00DF}' | '\u{03C2}' | '\u{200C}' | '\u{200D}'))
}

/// Validate total domain length and label lengths, in octets.
fn validate_domain_and_label_length(domain: &str) -> IdnaErrors {
    let mut errors = IdnaErrors::empty();
    let mut max_domain_size = MAX_DOMAIN_LENGTH;
    let mut labels = domain.split('.');

    // A trailing empty label is the root label: its "." delimiter is allowed
    // on top of the maximum size and its length is not checked.
    let mut label_count = domain.split('.').count();
    if label_count > 1 && domain.ends_with('.') {
        max_domain_size += 1;
        label_count -= 1;
    }

    if domain.len() > max_domain_size {
        errors |= IdnaErrors::DOMAIN_NAME_TOO_LONG;
    }

    if labels
        .by_ref()
        .take(label_count)
        .any(|label| label.len() > MAX_LABEL_LENGTH)
    {
        errors |= IdnaErrors::LABEL_TOO_LONG;
    }

    errors
}

/// Converts the input to its IDNA ASCII form.
///
/// The input is percent-decoded first. Printable ASCII input is checked
/// against the registered-name grammar and lower-cased; anything else goes
/// through UTS #46 processing.
///
/// # Errors
///
/// Returns an error if the percent-decoded input is not UTF-8, or if the
/// input needs UTS #46 processing and the `idna` feature is disabled.
pub fn to_ascii(domain: &str, options: IdnaOption) -> Result<IdnaResult> {
    let domain = percent_decode(domain)?;

    // Fast path: printable ASCII only, no UTS #46 processing needed
    if domain.bytes().all(|b| (0x20..0x80).contains(&b)) {
        let mut errors = validate_domain_and_label_length(&domain);
        if !is_registered_name(&domain) {
            errors |= IdnaErrors::DISALLOWED;
        }
        return Ok(IdnaResult::new(domain.to_ascii_lowercase(), false, errors));
    }

    backend::to_ascii(&domain, options)
}

/// Converts the input to its IDNA Unicode form.
///
/// Returns the percent-decoded input unchanged when it has no ACE label.
///
/// # Errors
///
/// Returns an error if the percent-decoded input is not UTF-8, or if the
/// input has ACE labels and the `idna` feature is disabled.
pub fn to_unicode(domain: &str, options: IdnaOption) -> Result<IdnaResult> {
    let domain = percent_decode(domain)?;

    if !has_punycode(&domain) {
        return Ok(IdnaResult::new(domain, false, IdnaErrors::empty()));
    }

    backend::to_unicode(&domain, options)
}

/// Converts the input to its IDNA ASCII form, failing on any reported error.
///
/// # Errors
///
/// Returns [`Error::ConversionFailed`] when the conversion reported errors,
/// and the errors of [`to_ascii`] otherwise.
pub fn to_ascii_or_fail(domain: &str, options: IdnaOption) -> Result<String> {
    let result = to_ascii(domain, options)?;
    if result.has_errors() {
        return Err(Error::ConversionFailed {
            domain: domain.to_string(),
            errors: result.errors(),
        });
    }
    Ok(result.into_value())
}

/// Converts the input to its IDNA Unicode form, failing on any reported error.
///
/// # Errors
///
/// Returns [`Error::ConversionFailed`] when the conversion reported errors,
/// and the errors of [`to_unicode`] otherwise.
pub fn to_unicode_or_fail(domain: &str, options: IdnaOption) -> Result<String> {
    let result = to_unicode(domain, options)?;
    if result.has_errors() {
        return Err(Error::ConversionFailed {
            domain: domain.to_string(),
            errors: result.errors(),
        });
    }
    Ok(result.into_value())
}

#[cfg(feature = "idna")]
mod backend {
    use super::{
        IdnaErrors, IdnaOption, IdnaResult, has_deviation_character,
        validate_domain_and_label_length,
    };
    use crate::compat::ToString;
    use crate::error::Result;
    use ::idna::uts46::{AsciiDenyList, DnsLength, Hyphens, Uts46};

    fn deny_list(options: IdnaOption) -> AsciiDenyList {
        if options.contains(IdnaOption::USE_STD3_RULES) {
            AsciiDenyList::STD3
        } else {
            AsciiDenyList::EMPTY
        }
    }

    /// Slow path: Unicode input, full UTS #46 processing
    pub(super) fn to_ascii(domain: &str, options: IdnaOption) -> Result<IdnaResult> {
        let transitional_different = options.contains(IdnaOption::NONTRANSITIONAL_TO_ASCII)
            && has_deviation_character(domain);

        let result = match Uts46::new().to_ascii(
            domain.as_bytes(),
            deny_list(options),
            Hyphens::Check,
            DnsLength::Ignore,
        ) {
            Ok(value) => {
                let errors = validate_domain_and_label_length(&value);
                IdnaResult::new(value.into_owned(), transitional_different, errors)
            }
            Err(_) => {
                tracing::debug!(domain, "UTS #46 processing rejected the domain");
                IdnaResult::new(
                    domain.to_lowercase(),
                    transitional_different,
                    validate_domain_and_label_length(domain) | IdnaErrors::DISALLOWED,
                )
            }
        };

        Ok(result)
    }

    pub(super) fn to_unicode(domain: &str, options: IdnaOption) -> Result<IdnaResult> {
        let (value, outcome) =
            Uts46::new().to_unicode(domain.as_bytes(), deny_list(options), Hyphens::Check);

        let transitional_different = options.contains(IdnaOption::NONTRANSITIONAL_TO_UNICODE)
            && has_deviation_character(&value);
        let errors = if outcome.is_ok() {
            IdnaErrors::empty()
        } else {
            tracing::debug!(domain, "UTS #46 processing rejected the domain");
            IdnaErrors::DISALLOWED
        };

        Ok(IdnaResult::new(
            value.to_string(),
            transitional_different,
            errors,
        ))
    }
}

#[cfg(not(feature = "idna"))]
mod backend {
    use super::{IdnaOption, IdnaResult};
    use crate::error::{Error, Result};

    pub(super) fn to_ascii(_domain: &str, _options: IdnaOption) -> Result<IdnaResult> {
        Err(Error::MissingIdnaSupport)
    }

    pub(super) fn to_unicode(_domain: &str, _options: IdnaOption) -> Result<IdnaResult> {
        Err(Error::MissingIdnaSupport)
    }
}
