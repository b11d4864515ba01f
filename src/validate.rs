//! Field validation for student records.
//!
//! Valid fields:
//! - NIM: exactly 12 ASCII digits
//! - Nama: 3-50 characters; letters, whitespace, `.`, `,`, `-`
//! - Email: empty, or `local@domain.tld`
//! - Telepon: empty, or `08` followed by 8-11 more digits
//! - IPK: a number in `[0.0, 4.0]`
//!
//! These are pure checks: the entity setters call them before mutating, and
//! a form collaborator can call them per keystroke without constructing an
//! entity first.

use crate::error::{Result, SimakError};

/// Checks a NIM: exactly 12 ASCII digits.
///
/// # Examples
/// ```
/// use simak::validate::is_valid_nim;
///
/// assert!(is_valid_nim("230411100001"));
///
/// assert!(!is_valid_nim("23041110000"));   // 11 digits
/// assert!(!is_valid_nim("23041110000a"));
/// assert!(!is_valid_nim(""));
/// ```
pub fn is_valid_nim(value: &str) -> bool {
    value.len() == 12 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Checks a name: 3-50 characters, restricted to letters, whitespace,
/// periods, commas, and hyphens.
///
/// # Examples
/// ```
/// use simak::validate::is_valid_nama;
///
/// assert!(is_valid_nama("Siti Rahayu"));
/// assert!(is_valid_nama("Dr. Budi, S.Kom"));
///
/// assert!(!is_valid_nama("Al"));           // too short
/// assert!(!is_valid_nama("Budi99"));
/// ```
pub fn is_valid_nama(value: &str) -> bool {
    let len = value.chars().count();
    (3..=50).contains(&len) && value.chars().all(is_valid_nama_char)
}

fn is_valid_nama_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch.is_whitespace() || matches!(ch, '.' | ',' | '-')
}

/// Checks an email address. An empty string is accepted (the field is
/// optional); otherwise the value must be `local@domain.tld` where the
/// local part uses alphanumerics and `._%+-`, the domain uses alphanumerics
/// and `.-`, and the TLD is at least two ASCII letters.
///
/// # Examples
/// ```
/// use simak::validate::is_valid_email;
///
/// assert!(is_valid_email(""));
/// assert!(is_valid_email("budi.s@kampus.ac.id"));
///
/// assert!(!is_valid_email("budi@kampus"));     // no TLD
/// assert!(!is_valid_email("@kampus.ac.id"));   // empty local part
/// assert!(!is_valid_email("budi kampus.ac.id"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_valid_email_local_char) {
        return false;
    }

    // Domain must end in a dot followed by a 2+ letter TLD.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty() || !host.chars().all(is_valid_email_domain_char) {
        return false;
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_valid_email_local_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '%' | '+' | '-')
}

fn is_valid_email_domain_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-')
}

/// Checks a phone number. An empty string is accepted; otherwise the value
/// must start with `08` and be 10-13 digits in total.
///
/// # Examples
/// ```
/// use simak::validate::is_valid_telepon;
///
/// assert!(is_valid_telepon(""));
/// assert!(is_valid_telepon("081234567890"));
///
/// assert!(!is_valid_telepon("0812345"));        // too short
/// assert!(!is_valid_telepon("621234567890"));   // wrong prefix
/// ```
pub fn is_valid_telepon(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    value.starts_with("08")
        && (10..=13).contains(&value.len())
        && value.bytes().all(|b| b.is_ascii_digit())
}

/// Checks an IPK value: within `[0.0, 4.0]`. NaN fails the range check.
pub fn is_valid_ipk(value: f64) -> bool {
    (0.0..=4.0).contains(&value)
}

/// Parses an IPK from text, as entered in a form. Non-numeric input and
/// out-of-range values both fail validation.
pub fn parse_ipk(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| SimakError::Validation("IPK must be a number".to_string()))?;
    if !is_valid_ipk(parsed) {
        return Err(SimakError::Validation(
            "IPK must be between 0.0 and 4.0".to_string(),
        ));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nim() {
        assert!(is_valid_nim("230411100001"));
        assert!(is_valid_nim("000000000000"));
    }

    #[test]
    fn test_invalid_nim() {
        assert!(!is_valid_nim(""));
        assert!(!is_valid_nim("23041110001")); // 11 digits
        assert!(!is_valid_nim("2304111000011")); // 13 digits
        assert!(!is_valid_nim("23041110000x"));
        assert!(!is_valid_nim("2304 1110000"));
    }

    #[test]
    fn test_valid_nama() {
        assert!(is_valid_nama("Ani"));
        assert!(is_valid_nama("Siti Rahayu"));
        assert!(is_valid_nama("Dr. Budi Santoso, S.Kom"));
        assert!(is_valid_nama("Putri Ayu-Lestari"));
    }

    #[test]
    fn test_invalid_nama() {
        assert!(!is_valid_nama(""));
        assert!(!is_valid_nama("Al")); // below minimum length
        assert!(!is_valid_nama(&"a".repeat(51)));
        assert!(!is_valid_nama("Budi99"));
        assert!(!is_valid_nama("Budi@Home"));
    }

    #[test]
    fn test_nama_length_counts_chars() {
        // Exactly at both boundaries.
        assert!(is_valid_nama("abc"));
        assert!(is_valid_nama(&"a".repeat(50)));
    }

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email(""));
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("budi.s@kampus.ac.id"));
        assert!(is_valid_email("nama+tag@sub.domain.com"));
        assert!(is_valid_email("user_99%x@host-1.org"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!is_valid_email("budi"));
        assert!(!is_valid_email("budi@"));
        assert!(!is_valid_email("@kampus.ac.id"));
        assert!(!is_valid_email("budi@kampus")); // no TLD
        assert!(!is_valid_email("budi@kampus.a")); // 1-letter TLD
        assert!(!is_valid_email("budi@kampus.a1")); // digit in TLD
        assert!(!is_valid_email("bu di@kampus.ac.id"));
        assert!(!is_valid_email("budi@.id")); // empty host
    }

    #[test]
    fn test_valid_telepon() {
        assert!(is_valid_telepon(""));
        assert!(is_valid_telepon("0812345678")); // 10 digits
        assert!(is_valid_telepon("0812345678901")); // 13 digits
    }

    #[test]
    fn test_invalid_telepon() {
        assert!(!is_valid_telepon("081234567")); // 9 digits
        assert!(!is_valid_telepon("08123456789012")); // 14 digits
        assert!(!is_valid_telepon("6281234567890"));
        assert!(!is_valid_telepon("08123abc67890"));
    }

    #[test]
    fn test_valid_ipk() {
        assert!(is_valid_ipk(0.0));
        assert!(is_valid_ipk(2.75));
        assert!(is_valid_ipk(4.0));
    }

    #[test]
    fn test_invalid_ipk() {
        assert!(!is_valid_ipk(-0.01));
        assert!(!is_valid_ipk(4.01));
        assert!(!is_valid_ipk(f64::NAN));
    }

    #[test]
    fn test_parse_ipk() {
        assert_eq!(parse_ipk("3.5").unwrap(), 3.5);
        assert_eq!(parse_ipk(" 4.0 ").unwrap(), 4.0);
        assert!(parse_ipk("tiga").is_err());
        assert!(parse_ipk("").is_err());
        assert!(parse_ipk("4.5").is_err());
    }
}
