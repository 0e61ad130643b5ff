//! Fixed token sets used by the extraction cascade.

/// Value returned when no rule yields a valid depositor name.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Routing-code suffixes that terminate a name segment.
pub const BANK_CODES: [&str; 7] = ["SBIN", "PUNB", "BARB", "JIOPXXX", "UCBA", "IBKL", "XXX"];

/// Transaction-mechanism identifiers that are never a depositor name.
pub const BLACKLIST: [&str; 14] = [
    "UPITRTR", "TRTR", "MPAY", "UPI", "TRANSFER", "NEFT", "RTGS", "XXX", "SBIN", "PUNB", "BARB",
    "UCBA", "IBKL", "JIOPXXX",
];

/// Check whether a value is exactly one of the blacklisted tokens (case-insensitive).
pub fn is_blacklisted(value: &str) -> bool {
    BLACKLIST.iter().any(|token| token.eq_ignore_ascii_case(value))
}

/// Check whether a depositor value is the fallback sentinel.
///
/// Records carrying the sentinel need manual review.
pub fn is_unknown(depositor: &str) -> bool {
    depositor == UNKNOWN_CUSTOMER
}
