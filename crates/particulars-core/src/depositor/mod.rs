//! Depositor name extraction from bank statement narrations.
//!
//! Narrations ("particulars") pack the payer name between transaction tags,
//! reference numbers and routing-code suffixes. Extraction runs a fixed
//! cascade of regex rules:
//!
//! 1. When the narration mentions `MPAY`, the MPAY rules run first and the
//!    first one that matches structurally decides the stage.
//! 2. Otherwise, or when the MPAY stage produced nothing usable, the
//!    universal rules run in order until a capture passes validation.
//! 3. When every rule fails, the result is [`UNKNOWN_CUSTOMER`].

mod extractor;
pub mod normalize;
pub mod patterns;
pub mod rules;
pub mod tokens;
pub mod validate;

pub use extractor::{extract_depositor, DepositorExtractor};
pub use normalize::normalize;
pub use rules::{Gate, Rule, RuleKind, Stage, MPAY_CASCADE, UNIVERSAL_CASCADE};
pub use tokens::{is_blacklisted, is_unknown, BANK_CODES, BLACKLIST, UNKNOWN_CUSTOMER};
pub use validate::is_valid_name;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidates for the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extracted value with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Rule that produced the value.
    pub rule: RuleKind,
    /// Stage the rule ran in.
    pub stage: Stage,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte span of the capture in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text matched by the rule.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &Rule, source: impl Into<String>) -> Self {
        Self {
            value,
            rule: rule.kind,
            stage: rule.stage,
            confidence: rule.kind.confidence(),
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
