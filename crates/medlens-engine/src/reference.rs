//! Analyte lookup and classification.

use medlens_types::{MeasurementStatus, ReferenceRange, REFERENCE_RANGES};

/// Lowercases a label and removes all whitespace.
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Finds the reference range for a label.
///
/// Returns the first table entry whose key occurs in the normalized label.
/// Table order is the only tie-break, so a label containing both `rbc` and
/// `wbc` resolves to `wbc`.
pub fn find_reference(label: &str) -> Option<&'static ReferenceRange> {
    let normalized = normalize_label(label);
    REFERENCE_RANGES
        .iter()
        .find(|range| normalized.contains(range.key))
}

/// Classifies a labelled value.
///
/// Returns the status and the display form of the matched range. Unknown
/// labels are `Normal` with an empty range string.
pub fn classify(label: &str, value: f64) -> (MeasurementStatus, String) {
    match find_reference(label) {
        Some(range) => (range.classify(value), range.display()),
        None => (MeasurementStatus::Normal, String::new()),
    }
}
