use particulars_core::depositor::{is_valid_name, normalize, BANK_CODES};
use particulars_core::{extract_depositor, UNKNOWN_CUSTOMER};
use proptest::prelude::*;

fn is_normalized(s: &str) -> bool {
    s.trim() == s && !s.contains("  ") && !s.contains(['\t', '\n', '\r'])
}

proptest! {
    #[test]
    fn extraction_is_deterministic(s in ".{0,160}") {
        prop_assert_eq!(extract_depositor(&s), extract_depositor(&s));
    }

    #[test]
    fn extraction_is_total(s in "\\PC{0,200}") {
        let name = extract_depositor(&s);
        prop_assert!(!name.is_empty());
    }

    #[test]
    fn output_is_normalized(s in "[A-Z0-9 /:\t-]{0,120}") {
        let name = extract_depositor(&s);
        prop_assert!(is_normalized(&name), "not normalized: {:?}", name);
    }

    #[test]
    fn universal_output_passes_validation(s in "[A-LN-Z0-9 /:-]{0,120}") {
        let name = extract_depositor(&s);
        prop_assert!(
            name == UNKNOWN_CUSTOMER || is_valid_name(&name),
            "invalid name {:?} from {:?}", name, s
        );
    }

    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,80}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(is_normalized(&once));
    }

    #[test]
    fn mpay_wins_over_other_keywords(
        name in "[A-Z]{4,12}( [A-Z]{4,12})?",
        first in 1u32..9_999_999,
        second in 1u32..99_999,
        keyword in prop::sample::select(vec!["NEFT", "RTGS", "TRANSFER", "UPI"]),
    ) {
        prop_assume!(!BANK_CODES.iter().any(|code| name.contains(code)));

        let narration = format!(
            "{keyword}/987654KAVITA IYERSBIN MPAYUPITRTR{first} {second} {name}SBINXXX30"
        );
        prop_assert_eq!(extract_depositor(&narration), name);
    }
}
