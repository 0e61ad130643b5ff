//! Acceptance checks applied to normalized captures.

use super::tokens::is_blacklisted;

/// Minimum number of characters a depositor name must exceed.
const MIN_NAME_LEN: usize = 2;

/// Check whether a normalized capture may be returned as a depositor name.
///
/// A name is rejected when it is a blacklisted transaction token, when it is
/// two characters or shorter, or when it consists only of digits.
pub fn is_valid_name(name: &str) -> bool {
    !is_blacklisted(name) && name.chars().count() > MIN_NAME_LEN && !is_numeric(name)
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("RAHUL KUMAR"));
        assert!(is_valid_name("ABC"));
        assert!(is_valid_name("CASH DEPOSIT"));
    }

    #[test]
    fn test_rejects_blacklisted() {
        assert!(!is_valid_name("UPITRTR"));
        assert!(!is_valid_name("transfer"));
        assert!(!is_valid_name("JIOPXXX"));
    }

    #[test]
    fn test_rejects_short() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("AB"));
    }

    #[test]
    fn test_rejects_numeric() {
        assert!(!is_valid_name("12345"));
        assert!(is_valid_name("123A"));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(!is_valid_name("ÅÉ"));
        assert!(is_valid_name("ÅÉÎ"));
    }
}
