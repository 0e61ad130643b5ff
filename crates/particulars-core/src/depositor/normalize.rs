//! Whitespace normalization for name captures.

/// Trim a capture and collapse every internal whitespace run to one space.
///
/// Letter case is left as found in the narration.
pub fn normalize(capture: &str) -> String {
    capture.split_whitespace().collect::<Vec<_>>().join(" ")
}
