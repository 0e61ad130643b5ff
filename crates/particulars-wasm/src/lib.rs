//! WASM bindings for depositor name extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use particulars_core::acceptance::run_cases;
use particulars_core::depositor::{self, DepositorExtractor, FieldExtractor};
use particulars_core::{summarize_customers, BackupDocument, BackupSource, Transaction};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract the depositor name from a narration.
///
/// Returns "Unknown Customer" when no name can be found.
#[wasm_bindgen]
pub fn extract_depositor(narration: &str) -> String {
    particulars_core::extract_depositor(narration)
}

/// Resolve an array of narrations, keeping order.
#[wasm_bindgen]
pub fn extract_depositors(narrations: &js_sys::Array) -> js_sys::Array {
    narrations
        .iter()
        .map(|value| {
            let narration = value.as_string().unwrap_or_default();
            JsValue::from_str(&particulars_core::extract_depositor(&narration))
        })
        .collect()
}

/// Whether a candidate string would be accepted as a depositor name.
#[wasm_bindgen]
pub fn is_valid_name(candidate: &str) -> bool {
    depositor::is_valid_name(candidate)
}

/// Whether a depositor value is the fallback sentinel.
#[wasm_bindgen]
pub fn is_unknown(depositor: &str) -> bool {
    particulars_core::is_unknown(depositor)
}

/// Collapse whitespace runs and trim.
#[wasm_bindgen]
pub fn normalize_name(candidate: &str) -> String {
    depositor::normalize(candidate)
}

/// Serializable view of an extraction match.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchJs {
    depositor: String,
    rule: &'static str,
    stage: &'static str,
    confidence: f32,
    start: Option<usize>,
    end: Option<usize>,
    source: String,
}

impl From<depositor::ExtractionMatch<String>> for MatchJs {
    fn from(found: depositor::ExtractionMatch<String>) -> Self {
        Self {
            depositor: found.value,
            rule: found.rule.as_str(),
            stage: found.stage.as_str(),
            confidence: found.confidence,
            start: found.position.map(|(start, _)| start),
            end: found.position.map(|(_, end)| end),
            source: found.source,
        }
    }
}

/// Depositor extractor class for browser use.
#[wasm_bindgen]
pub struct DepositorResolver {
    extractor: DepositorExtractor,
}

#[wasm_bindgen]
impl DepositorResolver {
    /// Create a new resolver.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: DepositorExtractor::new(),
        }
    }

    /// Resolve a narration to a depositor name.
    #[wasm_bindgen]
    pub fn resolve(&self, narration: &str) -> String {
        self.extractor.resolve(narration)
    }

    /// The winning match with its rule, or `null` when nothing matched.
    #[wasm_bindgen]
    pub fn explain(&self, narration: &str) -> Result<JsValue, JsValue> {
        match self.extractor.extract(narration) {
            Some(found) => to_js(&MatchJs::from(found)),
            None => Ok(JsValue::NULL),
        }
    }

    /// Every accepted candidate, in cascade order.
    #[wasm_bindgen]
    pub fn candidates(&self, narration: &str) -> Result<JsValue, JsValue> {
        let all: Vec<MatchJs> = self
            .extractor
            .extract_all(narration)
            .into_iter()
            .map(MatchJs::from)
            .collect();
        to_js(&all)
    }
}

impl Default for DepositorResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate a backup document, returning it as a JS object.
#[wasm_bindgen]
pub fn import_backup(json: &str) -> Result<JsValue, JsValue> {
    let document = BackupDocument::from_json(json).map_err(to_js_error)?;
    to_js(&document)
}

/// Build a backup document from an array of transaction objects.
///
/// Blank depositors are resolved from the narration; `source` is
/// `"auto-backup"` or `"manual-export"`.
#[wasm_bindgen]
pub fn export_backup(transactions: JsValue, source: &str) -> Result<String, JsValue> {
    let mut transactions: Vec<Transaction> =
        serde_wasm_bindgen::from_value(transactions).map_err(to_js_error)?;
    let source: BackupSource =
        serde_json::from_value(serde_json::Value::String(source.to_string()))
            .map_err(to_js_error)?;

    for txn in &mut transactions {
        txn.resolve_depositor();
    }

    let customers = summarize_customers(&transactions);
    BackupDocument::new(transactions, customers, source)
        .to_json_pretty()
        .map_err(to_js_error)
}

/// Run the built-in acceptance table.
#[wasm_bindgen]
pub fn run_acceptance() -> Result<JsValue, JsValue> {
    to_js(&run_cases())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(to_js_error)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_depositor() {
        assert_eq!(
            extract_depositor("UPITRTR987654 2000 RAHUL KUMARUCBAXXX12 456789123/20-08-25 10:15:20"),
            "RAHUL KUMAR"
        );
        assert_eq!(extract_depositor(""), "Unknown Customer");
    }

    #[wasm_bindgen_test]
    fn test_extract_depositors_keeps_order() {
        let input = js_sys::Array::new();
        input.push(&JsValue::from_str("CASH DEPOSIT"));
        input.push(&JsValue::from_str("1234567890"));

        let output = extract_depositors(&input);
        assert_eq!(output.length(), 2);
        assert_eq!(output.get(0).as_string().unwrap(), "CASH DEPOSIT");
        assert_eq!(output.get(1).as_string().unwrap(), "Unknown Customer");
    }

    #[wasm_bindgen_test]
    fn test_validation_helpers() {
        assert!(is_valid_name("ANIL"));
        assert!(!is_valid_name("NEFT"));
        assert!(is_unknown("Unknown Customer"));
        assert_eq!(normalize_name("  PRIYA   SHARMA "), "PRIYA SHARMA");
    }

    #[wasm_bindgen_test]
    fn test_explain() {
        let resolver = DepositorResolver::new();
        assert!(resolver.explain("1234567890").unwrap().is_null());
        assert!(resolver.explain("CASH DEPOSIT").unwrap().is_object());
    }

    #[wasm_bindgen_test]
    fn test_import_backup_rejects_missing_version() {
        assert!(import_backup(r#"{"transactions": [], "customers": []}"#).is_err());
    }
}
