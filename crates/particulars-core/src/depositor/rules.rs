//! Ordered rule tables for the MPAY and universal cascades.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use super::patterns::*;
use super::tokens::is_blacklisted;
use super::validate::is_valid_name;

/// Cascade stage a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Pre-check run only when the narration mentions MPAY.
    Mpay,
    /// Keyword and generic rules run for every narration.
    Universal,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mpay => "mpay",
            Self::Universal => "universal",
        }
    }
}

/// Identifier of a single extraction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    MpayStrict,
    MpayRelaxed,
    MpayPermissive,
    UpiStrict,
    UpiRelaxed,
    TransferStrict,
    TransferRelaxed,
    NeftStrict,
    NeftRelaxed,
    RtgsStrict,
    RtgsRelaxed,
    GenericTerminated,
    GenericLoose,
}

impl RuleKind {
    /// Stable snake_case name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MpayStrict => "mpay_strict",
            Self::MpayRelaxed => "mpay_relaxed",
            Self::MpayPermissive => "mpay_permissive",
            Self::UpiStrict => "upi_strict",
            Self::UpiRelaxed => "upi_relaxed",
            Self::TransferStrict => "transfer_strict",
            Self::TransferRelaxed => "transfer_relaxed",
            Self::NeftStrict => "neft_strict",
            Self::NeftRelaxed => "neft_relaxed",
            Self::RtgsStrict => "rtgs_strict",
            Self::RtgsRelaxed => "rtgs_relaxed",
            Self::GenericTerminated => "generic_terminated",
            Self::GenericLoose => "generic_loose",
        }
    }

    /// Display-only score for a capture produced by this rule (0.0 - 1.0).
    pub fn confidence(&self) -> f32 {
        match self {
            Self::MpayStrict | Self::UpiStrict => 0.95,
            Self::TransferStrict | Self::NeftStrict | Self::RtgsStrict => 0.9,
            Self::MpayRelaxed | Self::UpiRelaxed => 0.8,
            Self::TransferRelaxed | Self::NeftRelaxed | Self::RtgsRelaxed => 0.7,
            Self::MpayPermissive => 0.6,
            Self::GenericTerminated => 0.4,
            Self::GenericLoose => 0.3,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::MpayStrict => &*MPAY_STRICT,
            Self::MpayRelaxed => &*MPAY_RELAXED,
            Self::MpayPermissive => &*MPAY_PERMISSIVE,
            Self::UpiStrict => &*UPI_STRICT,
            Self::UpiRelaxed => &*UPI_RELAXED,
            Self::TransferStrict => &*TRANSFER_STRICT,
            Self::TransferRelaxed => &*TRANSFER_RELAXED,
            Self::NeftStrict => &*NEFT_STRICT,
            Self::NeftRelaxed => &*NEFT_RELAXED,
            Self::RtgsStrict => &*RTGS_STRICT,
            Self::RtgsRelaxed => &*RTGS_RELAXED,
            Self::GenericTerminated => &*GENERIC_TERMINATED,
            Self::GenericLoose => &*GENERIC_LOOSE,
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a stage applies to a rule's normalized capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Accept any structural match.
    None,
    /// Reject only exact blacklisted tokens.
    Blacklist,
    /// Full name validation.
    Full,
}

impl Gate {
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Self::None => true,
            Self::Blacklist => !is_blacklisted(name),
            Self::Full => is_valid_name(name),
        }
    }
}

/// A cascade entry: which pattern to run and how its capture is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub stage: Stage,
    pub gate: Gate,
}

/// Raw structural match of a rule against a narration.
#[derive(Debug, Clone)]
pub struct Capture<'t> {
    /// Normalized name candidate.
    pub name: String,
    /// Byte span of the name group in the narration.
    pub span: (usize, usize),
    /// Full text matched by the rule pattern.
    pub matched: &'t str,
}

impl Rule {
    const fn new(kind: RuleKind, stage: Stage, gate: Gate) -> Self {
        Self { kind, stage, gate }
    }

    /// Run the rule pattern and normalize the name group, without gating.
    pub fn capture<'t>(&self, narration: &'t str) -> Option<Capture<'t>> {
        let caps = self.kind.pattern().captures(narration)?;
        let group = caps.get(1)?;
        let whole = caps.get(0)?;

        Some(Capture {
            name: normalize(group.as_str()),
            span: (group.start(), group.end()),
            matched: whole.as_str(),
        })
    }
}

/// MPAY pre-check. The first rule that matches structurally decides the stage.
pub const MPAY_CASCADE: [Rule; 3] = [
    Rule::new(RuleKind::MpayStrict, Stage::Mpay, Gate::None),
    Rule::new(RuleKind::MpayRelaxed, Stage::Mpay, Gate::None),
    Rule::new(RuleKind::MpayPermissive, Stage::Mpay, Gate::Blacklist),
];

/// Universal cascade. The first capture passing validation wins.
pub const UNIVERSAL_CASCADE: [Rule; 10] = [
    Rule::new(RuleKind::UpiStrict, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::UpiRelaxed, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::TransferStrict, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::TransferRelaxed, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::NeftStrict, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::NeftRelaxed, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::RtgsStrict, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::RtgsRelaxed, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::GenericTerminated, Stage::Universal, Gate::Full),
    Rule::new(RuleKind::GenericLoose, Stage::Universal, Gate::Full),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_order() {
        let mpay: Vec<_> = MPAY_CASCADE.iter().map(|r| r.kind).collect();
        assert_eq!(
            mpay,
            vec![RuleKind::MpayStrict, RuleKind::MpayRelaxed, RuleKind::MpayPermissive]
        );

        let universal: Vec<_> = UNIVERSAL_CASCADE.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(
            universal,
            vec![
                "upi_strict",
                "upi_relaxed",
                "transfer_strict",
                "transfer_relaxed",
                "neft_strict",
                "neft_relaxed",
                "rtgs_strict",
                "rtgs_relaxed",
                "generic_terminated",
                "generic_loose",
            ]
        );
    }

    #[test]
    fn test_gates() {
        assert!(Gate::None.accepts("UPI"));
        assert!(!Gate::Blacklist.accepts("upi"));
        assert!(Gate::Blacklist.accepts("AB"));
        assert!(!Gate::Full.accepts("AB"));
        assert!(Gate::Full.accepts("ABC"));
    }

    #[test]
    fn test_capture_is_normalized() {
        let rule = MPAY_CASCADE[0];
        let narration = "MPAYUPITRTR123 456 RAVI   KUMAR\tSBINXXX";
        let capture = rule.capture(narration).unwrap();
        assert_eq!(capture.name, "RAVI KUMAR");
        assert_eq!(&narration[capture.span.0..capture.span.1], "RAVI   KUMAR\t");
        assert!(capture.matched.starts_with("MPAYUPITRTR123"));
        assert!(capture.matched.ends_with("SBIN"));
    }

    #[test]
    fn test_capture_none_without_structure() {
        assert!(UNIVERSAL_CASCADE[0].capture("CASH DEPOSIT").is_none());
        assert!(UNIVERSAL_CASCADE[9].capture("1234 5678").is_none());
    }
}
