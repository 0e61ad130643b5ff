//! Cascade driver for depositor name extraction.

use tracing::{debug, trace};

use super::patterns::MPAY_KEYWORD;
use super::rules::{Capture, Rule, MPAY_CASCADE, UNIVERSAL_CASCADE};
use super::tokens::UNKNOWN_CUSTOMER;
use super::{ExtractionMatch, FieldExtractor};

/// Depositor name extractor.
///
/// Holds no state; the compiled patterns are shared process-wide, so a single
/// extractor can be used from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepositorExtractor;

impl DepositorExtractor {
    /// Create a new depositor extractor.
    pub fn new() -> Self {
        Self
    }

    /// Resolve a narration to a depositor name, or [`UNKNOWN_CUSTOMER`].
    pub fn resolve(&self, narration: &str) -> String {
        self.extract(narration)
            .map(|m| m.value)
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string())
    }

    /// Run the MPAY stage. Only the first structural match is considered.
    fn mpay_stage(&self, narration: &str) -> Option<ExtractionMatch<String>> {
        for rule in &MPAY_CASCADE {
            let Some(capture) = rule.capture(narration) else {
                continue;
            };

            if rule.gate.accepts(&capture.name) {
                trace!("{} decided MPAY stage: {:?}", rule.kind, capture.name);
                return Some(to_match(rule, capture));
            }

            trace!(
                "{} capture {:?} rejected, leaving MPAY stage",
                rule.kind,
                capture.name
            );
            return None;
        }

        trace!("no MPAY rule matched");
        None
    }

    /// Run the universal stage. The first capture passing its gate wins.
    fn universal_stage(&self, narration: &str) -> Option<ExtractionMatch<String>> {
        for rule in &UNIVERSAL_CASCADE {
            let Some(capture) = rule.capture(narration) else {
                continue;
            };

            if rule.gate.accepts(&capture.name) {
                trace!("{} accepted: {:?}", rule.kind, capture.name);
                return Some(to_match(rule, capture));
            }

            trace!("{} capture {:?} rejected", rule.kind, capture.name);
        }

        None
    }
}

fn to_match(rule: &Rule, capture: Capture<'_>) -> ExtractionMatch<String> {
    ExtractionMatch::new(capture.name, rule, capture.matched)
        .with_position(capture.span.0, capture.span.1)
}

impl FieldExtractor for DepositorExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        if MPAY_KEYWORD.is_match(text) {
            if let Some(found) = self.mpay_stage(text) {
                return Some(found);
            }
        }

        let found = self.universal_stage(text);
        if found.is_none() {
            debug!("No depositor found in {:?}, using fallback", text);
        }
        found
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mpay: &[Rule] = if MPAY_KEYWORD.is_match(text) {
            &MPAY_CASCADE
        } else {
            &[]
        };

        mpay.iter()
            .chain(UNIVERSAL_CASCADE.iter())
            .filter_map(|rule| {
                let capture = rule.capture(text)?;
                rule.gate
                    .accepts(&capture.name)
                    .then(|| to_match(rule, capture))
            })
            .collect()
    }
}

/// Extract the depositor name from a narration.
///
/// Never fails: narrations without a recognizable name resolve to
/// `"Unknown Customer"`.
pub fn extract_depositor(narration: &str) -> String {
    DepositorExtractor::new().resolve(narration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depositor::rules::{RuleKind, Stage};
    use pretty_assertions::assert_eq;

    fn rule_for(narration: &str) -> Option<RuleKind> {
        DepositorExtractor::new().extract(narration).map(|m| m.rule)
    }

    #[test]
    fn test_mpay_with_upitrtr_tag() {
        assert_eq!(
            extract_depositor(
                "MPAYUPITRTR5222741 19801 NAVEENKUMARSBINXXX30 522249979249/10-08-25 12:25:30"
            ),
            "NAVEENKUMAR"
        );
    }

    #[test]
    fn test_mpay_name_with_space() {
        assert_eq!(
            extract_depositor(
                "MPAYUPITRTR123456 5000 HARISH SINGHPUNBXXX25 987654321/15-08-25 14:30:45"
            ),
            "HARISH SINGH"
        );
    }

    #[test]
    fn test_upi_transaction() {
        let narration = "UPITRTR987654 2000 RAHUL KUMARUCBAXXX12 456789123/20-08-25 10:15:20";
        assert_eq!(extract_depositor(narration), "RAHUL KUMAR");
        assert_eq!(rule_for(narration), Some(RuleKind::UpiStrict));
    }

    #[test]
    fn test_fallback_to_unknown() {
        assert_eq!(extract_depositor(""), UNKNOWN_CUSTOMER);
        assert_eq!(extract_depositor("1234567890"), UNKNOWN_CUSTOMER);
        assert_eq!(extract_depositor("12/08/25 00:00:01 - 99"), UNKNOWN_CUSTOMER);
    }

    #[test]
    fn test_generic_capture_without_keyword() {
        assert_eq!(extract_depositor("CASH DEPOSIT"), "CASH DEPOSIT");
        assert_eq!(rule_for("CASH DEPOSIT"), Some(RuleKind::GenericTerminated));
    }

    #[test]
    fn test_mpay_relaxed_missing_second_group() {
        let narration = "MPAYUPI5551234 PRIYA SHARMABARBXXX99";
        assert_eq!(extract_depositor(narration), "PRIYA SHARMA");
        assert_eq!(rule_for(narration), Some(RuleKind::MpayRelaxed));
    }

    #[test]
    fn test_mpay_permissive() {
        let narration = "MPAY/REF 778812/ GANESH TRADERS";
        assert_eq!(extract_depositor(narration), "GANESH TRADERS");
        assert_eq!(rule_for(narration), Some(RuleKind::MpayPermissive));
    }

    #[test]
    fn test_mpay_permissive_blacklisted_falls_through() {
        let narration = "MPAY-1 NEFT 55ANITA ROYBARBXXX";
        let found = DepositorExtractor::new().extract(narration).unwrap();
        assert_eq!(found.value, "ANITA ROY");
        assert_eq!(found.rule, RuleKind::NeftStrict);
        assert_eq!(found.stage, Stage::Universal);
    }

    #[test]
    fn test_mpay_takes_priority_over_other_keywords() {
        let neft_only = "NEFT/987654KAVITA IYERSBIN";
        assert_eq!(extract_depositor(neft_only), "KAVITA IYER");

        let both = "NEFT/987654KAVITA IYERSBIN MPAYUPI111 222 SITA DEVIBARBXXX1";
        assert_eq!(extract_depositor(both), "SITA DEVI");
        assert_eq!(rule_for(both), Some(RuleKind::MpayStrict));
    }

    #[test]
    fn test_mpay_strict_capture_is_not_validated() {
        assert_eq!(extract_depositor("MPAYUPI123 456 UPISBIN"), "UPI");
    }

    #[test]
    fn test_mpay_relaxed_capture_is_not_validated() {
        let narration = "MPAYUPI5551234 UPISBIN";
        let found = DepositorExtractor::new().extract(narration).unwrap();
        assert_eq!(found.value, "UPI");
        assert_eq!(found.rule, RuleKind::MpayRelaxed);
        assert_eq!(extract_depositor(narration), "UPI");
    }

    #[test]
    fn test_rejected_capture_moves_to_next_rule() {
        let narration = "UPI42 TRANSFER 777LATA BOSEUCBA";
        let candidates = DepositorExtractor::new().extract_all(narration);
        assert!(candidates.iter().all(|c| c.value != "TRANSFER"));

        let found = DepositorExtractor::new().extract(narration).unwrap();
        assert_eq!(found.value, "LATA BOSE");
        assert_eq!(found.rule, RuleKind::TransferStrict);
    }

    #[test]
    fn test_transfer_strict() {
        assert_eq!(extract_depositor("TRANSFER 4432SURESH RAOIBKLXXX5"), "SURESH RAO");
    }

    #[test]
    fn test_rtgs_relaxed() {
        let narration = "RTGS:VIJAY MEHTA 2024";
        assert_eq!(extract_depositor(narration), "VIJAY MEHTA");
        assert_eq!(rule_for(narration), Some(RuleKind::RtgsRelaxed));
    }

    #[test]
    fn test_generic_after_unmatched_keyword() {
        let narration = "UPI/123456789012/ANIL VERMA";
        assert_eq!(extract_depositor(narration), "ANIL VERMA");
        assert_eq!(rule_for(narration), Some(RuleKind::GenericTerminated));
    }

    #[test]
    fn test_only_transaction_tokens() {
        assert_eq!(extract_depositor("UPI"), UNKNOWN_CUSTOMER);
        assert_eq!(extract_depositor("MPAY-1 RTGS"), UNKNOWN_CUSTOMER);
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(
            extract_depositor("mpayupitrtr5222741 19801 naveenkumarsbinxxx30"),
            "naveenkumar"
        );
    }

    #[test]
    fn test_internal_whitespace_is_collapsed() {
        assert_eq!(
            extract_depositor("MPAYUPITRTR123 456 RAVI   KUMAR\tSBINXXX"),
            "RAVI KUMAR"
        );
    }

    #[test]
    fn test_match_metadata() {
        let narration = "UPITRTR987654 2000 RAHUL KUMARUCBAXXX12";
        let found = DepositorExtractor::new().extract(narration).unwrap();
        let (start, end) = found.position.unwrap();
        assert_eq!(&narration[start..end], "RAHUL KUMAR");
        assert_eq!(found.source, "UPITRTR987654 2000 RAHUL KUMARUCBA");
        assert!(found.confidence > 0.9);
    }

    #[test]
    fn test_extract_all_leads_with_extract() {
        let extractor = DepositorExtractor::new();
        for narration in [
            "MPAYUPITRTR123456 5000 HARISH SINGHPUNBXXX25",
            "MPAY-1 NEFT 55ANITA ROYBARBXXX",
            "UPI42 TRANSFER 777LATA BOSEUCBA",
            "CASH DEPOSIT",
        ] {
            let first = extractor.extract_all(narration).into_iter().next();
            assert_eq!(first, extractor.extract(narration), "{narration}");
        }
    }
}
