//! Regex patterns for the depositor extraction cascade.
//!
//! Every pattern is case-insensitive and exposes the name candidate as
//! capture group 1. Name runs use lazy quantifiers so a capture stops at the
//! first terminator rather than swallowing the routing suffix.

use lazy_static::lazy_static;
use regex::Regex;

/// Alternation body of the bank-code terminators, kept in sync with
/// [`BANK_CODES`](super::tokens::BANK_CODES).
macro_rules! bank_codes {
    () => {
        "SBIN|PUNB|BARB|JIOPXXX|UCBA|IBKL|XXX"
    };
}

/// `<KEYWORD>...<digits><NAME><bank code>`
macro_rules! keyword_strict {
    ($keyword:literal) => {
        concat!(
            r"(?i)",
            $keyword,
            r".*?(?:[0-9]+)([A-Z][A-Z\s]+?)(?:",
            bank_codes!(),
            r")"
        )
    };
}

/// `<KEYWORD>...<NAME>` ended by a bank-code-like suffix, a digit or end of text.
macro_rules! keyword_relaxed {
    ($keyword:literal) => {
        concat!(
            r"(?i)",
            $keyword,
            r".*?([A-Z][A-Z\s]{2,20}?)(?:[A-Z]{3,4}XXX|[0-9]|$)"
        )
    };
}

lazy_static! {
    // MPAY keyword probe
    pub static ref MPAY_KEYWORD: Regex = Regex::new(r"(?i)MPAY").unwrap();

    // MPAYUPITRTR5222741 19801 NAVEENKUMARSBINXXX30
    pub static ref MPAY_STRICT: Regex = Regex::new(concat!(
        r"(?i)MPAY(?:UPITRTR|UPI|TRTR)?[0-9]+\s+[0-9]+\s+([A-Z][A-Z\s]+?)(?:",
        bank_codes!(),
        r")"
    )).unwrap();

    // Second digit group and separators may be missing
    pub static ref MPAY_RELAXED: Regex = Regex::new(concat!(
        r"(?i)MPAY[A-Z0-9_]*[0-9]+\s+[0-9]*\s*([A-Z][A-Z\s]{2,20}?)(?:",
        bank_codes!(),
        r"|[0-9]|$)"
    )).unwrap();

    pub static ref MPAY_PERMISSIVE: Regex = Regex::new(
        r"(?i)MPAY(?:UPITRTR|UPI|TRTR)?.*?[0-9]+.*?([A-Z][A-Z\s]{3,20}?)(?:[A-Z]{3,4}XXX|[0-9]|$)"
    ).unwrap();

    // UPITRTR987654 2000 RAHUL KUMARUCBAXXX12
    pub static ref UPI_STRICT: Regex = Regex::new(concat!(
        r"(?i)UPI(?:TRTR)?[0-9]+\s+[0-9]+\s+([A-Z][A-Z\s]+?)(?:",
        bank_codes!(),
        r")"
    )).unwrap();

    pub static ref UPI_RELAXED: Regex = Regex::new(concat!(
        r"(?i)UPI[A-Z0-9_]*[0-9]+\s+[0-9]*\s*([A-Z][A-Z\s]{3,20}?)(?:",
        bank_codes!(),
        r"|[0-9]|$)"
    )).unwrap();

    pub static ref TRANSFER_STRICT: Regex = Regex::new(keyword_strict!("TRANSFER")).unwrap();
    pub static ref TRANSFER_RELAXED: Regex = Regex::new(keyword_relaxed!("TRANSFER")).unwrap();

    pub static ref NEFT_STRICT: Regex = Regex::new(keyword_strict!("NEFT")).unwrap();
    pub static ref NEFT_RELAXED: Regex = Regex::new(keyword_relaxed!("NEFT")).unwrap();

    pub static ref RTGS_STRICT: Regex = Regex::new(keyword_strict!("RTGS")).unwrap();
    pub static ref RTGS_RELAXED: Regex = Regex::new(keyword_relaxed!("RTGS")).unwrap();

    // Keyword-independent fallbacks
    pub static ref GENERIC_TERMINATED: Regex = Regex::new(
        r"(?i)([A-Z][A-Z\s]{2,20}?)(?:[A-Z]{3,4}XXX|[0-9]|$)"
    ).unwrap();

    pub static ref GENERIC_LOOSE: Regex = Regex::new(
        r"(?i)([A-Z][A-Z\s]{2,20})"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depositor::tokens::BANK_CODES;

    #[test]
    fn test_bank_code_alternation_matches_token_set() {
        let alternation: Vec<&str> = bank_codes!().split('|').collect();
        assert_eq!(alternation, BANK_CODES.to_vec());
    }

    #[test]
    fn test_mpay_strict_capture() {
        let caps = MPAY_STRICT
            .captures("MPAYUPITRTR5222741 19801 NAVEENKUMARSBINXXX30 522249979249")
            .unwrap();
        assert_eq!(&caps[1], "NAVEENKUMAR");
    }

    #[test]
    fn test_mpay_strict_needs_both_digit_groups() {
        assert!(!MPAY_STRICT.is_match("MPAYUPI5551234 PRIYA SHARMABARBXXX99"));
        assert!(MPAY_RELAXED.is_match("MPAYUPI5551234 PRIYA SHARMABARBXXX99"));
    }

    #[test]
    fn test_upi_strict_capture() {
        let caps = UPI_STRICT
            .captures("UPITRTR987654 2000 RAHUL KUMARUCBAXXX12 456789123")
            .unwrap();
        assert_eq!(&caps[1], "RAHUL KUMAR");
    }

    #[test]
    fn test_keyword_strict_capture() {
        let caps = NEFT_STRICT
            .captures("NEFT/987654KAVITA IYERSBIN0001234")
            .unwrap();
        assert_eq!(&caps[1], "KAVITA IYER");
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let caps = MPAY_STRICT
            .captures("mpayupitrtr5222741 19801 naveenkumarsbinxxx30")
            .unwrap();
        assert_eq!(&caps[1], "naveenkumar");
        assert!(MPAY_KEYWORD.is_match("refmPaY"));
    }

    #[test]
    fn test_generic_terminated_runs_to_end() {
        let caps = GENERIC_TERMINATED.captures("CASH DEPOSIT").unwrap();
        assert_eq!(&caps[1], "CASH DEPOSIT");
    }

    #[test]
    fn test_generic_loose_is_greedy() {
        let caps = GENERIC_LOOSE.captures("MPAY-1 RTGS").unwrap();
        assert_eq!(&caps[1], "MPAY");
    }
}
