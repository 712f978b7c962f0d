//! Measurement scanner for free report text.
//!
//! Each line is matched repeatedly against one pattern: a label of word
//! characters and spaces, a separator of whitespace or colons, a decimal
//! number, then an optional unit token. Unit tokens match case-insensitively.

use std::str::Split;
use std::sync::LazyLock;

use medlens_types::{ExtractionResult, Measurement, ReportCategory, RECOGNIZED_UNITS};
use regex::{CaptureMatches, Captures, Regex};

use crate::reference;
use crate::types::EngineConfig;

/// Label, separator, number and optional unit.
///
/// Only the unit alternation is case-insensitive, so the label and number
/// classes stay ASCII as they are in the upstream extractors' output.
static MEASUREMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let units = RECOGNIZED_UNITS
        .iter()
        .map(|unit| regex::escape(unit))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"([0-9A-Za-z_]+[0-9A-Za-z_\s]*?)[\s:]+([0-9]+\.?[0-9]*)\s*(?i:({units}))?"
    ))
    .expect("measurement pattern is a valid regex")
});

/// A streaming scanner over the measurements in a text.
///
/// Yields candidates line by line, in encounter order, without deduplication.
pub struct MeasurementScanner<'t> {
    lines: Split<'t, char>,
    current: Option<CaptureMatches<'static, 't>>,
    max_label_len: usize,
    lines_read: usize,
}

impl<'t> MeasurementScanner<'t> {
    /// Creates a scanner over `text`.
    pub fn new(text: &'t str, config: &EngineConfig) -> Self {
        Self {
            lines: text.split('\n'),
            current: None,
            max_label_len: config.max_label_len,
            lines_read: 0,
        }
    }

    /// Returns the number of lines started so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl Iterator for MeasurementScanner<'_> {
    type Item = Measurement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(matches) = self.current.as_mut() {
                for caps in matches.by_ref() {
                    if let Some(measurement) = candidate(&caps, self.max_label_len) {
                        return Some(measurement);
                    }
                }
            }

            let line = self.lines.next()?;
            self.lines_read += 1;
            self.current = Some(MEASUREMENT_PATTERN.captures_iter(line));
        }
    }
}

/// Builds a classified measurement from one pattern match.
fn candidate(caps: &Captures<'_>, max_label_len: usize) -> Option<Measurement> {
    let name = parse::label(caps.get(1)?.as_str(), max_label_len)?;
    let value = parse::number(caps.get(2)?.as_str())?;
    let unit = caps.get(3).map_or("", |m| m.as_str());

    let (status, reference_range) = reference::classify(name, value);

    Some(Measurement {
        name: name.to_string(),
        value,
        unit: unit.to_string(),
        status,
        reference_range,
    })
}

/// Scans report text and classifies the measurements found.
///
/// Never fails. When nothing is found in non-empty text, imaging categories
/// yield the first 20 non-blank lines as findings and every other category
/// yields the text unchanged. Empty text yields an empty unstructured result.
///
/// # Examples
///
/// ```
/// use medlens_engine::parse_measurements;
/// use medlens_types::{ExtractionResult, MeasurementStatus, ReportCategory};
///
/// let result = parse_measurements("Hemoglobin: 9.5 g/dl", ReportCategory::Bloodtest);
/// let data = result.measurements();
/// assert_eq!(data[0].name, "Hemoglobin");
/// assert_eq!(data[0].status, MeasurementStatus::Low);
/// assert_eq!(data[0].reference_range, "12 - 17.5 g/dL");
/// ```
pub fn parse_measurements(text: &str, category: ReportCategory) -> ExtractionResult {
    parse_measurements_with_config(text, category, &EngineConfig::default())
}

/// Same as [`parse_measurements`] with explicit tunables.
pub fn parse_measurements_with_config(
    text: &str,
    category: ReportCategory,
    config: &EngineConfig,
) -> ExtractionResult {
    let mut scanner = MeasurementScanner::new(text, config);
    let data: Vec<Measurement> = scanner.by_ref().collect();

    let result = if !data.is_empty() {
        ExtractionResult::Structured {
            data,
            raw_text: text.to_string(),
        }
    } else if !text.is_empty() && category.is_imaging() {
        let findings = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .take(config.max_imaging_findings)
            .map(str::to_string)
            .collect();
        ExtractionResult::Imaging {
            findings,
            raw_text: text.to_string(),
        }
    } else {
        ExtractionResult::Unstructured {
            raw_text: text.to_string(),
        }
    };

    tracing::debug!(
        kind = result.kind(),
        measurements = result.measurements().len(),
        lines = scanner.lines_read(),
        category = category.as_str(),
        "scanned report text"
    );

    result
}

/// Helper functions for validating matched tokens.
pub mod parse {
    /// Trims a label and rejects empty or overlong ones.
    ///
    /// Labels of `max_len` characters or more are treated as prose.
    pub fn label(raw: &str, max_len: usize) -> Option<&str> {
        let label = raw.trim();
        if label.is_empty() || label.chars().count() >= max_len {
            return None;
        }
        Some(label)
    }

    /// Parses a decimal token, rejecting NaN.
    pub fn number(raw: &str) -> Option<f64> {
        raw.parse::<f64>().ok().filter(|value| !value.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medlens_types::MeasurementStatus;

    fn scan(text: &str) -> Vec<Measurement> {
        MeasurementScanner::new(text, &EngineConfig::default()).collect()
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse::label("  Glucose ", 50), Some("Glucose"));
        assert_eq!(parse::label("   ", 50), None);
        assert_eq!(parse::label(&"a".repeat(49), 50).map(str::len), Some(49));
        assert_eq!(parse::label(&"a".repeat(50), 50), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse::number("9.5"), Some(9.5));
        assert_eq!(parse::number("250"), Some(250.0));
        assert_eq!(parse::number("12."), Some(12.0));
        assert_eq!(parse::number("abc"), None);
    }

    #[test]
    fn test_hemoglobin_low() {
        let result = parse_measurements("Hemoglobin: 9.5 g/dl", ReportCategory::Bloodtest);
        assert_eq!(
            result,
            ExtractionResult::Structured {
                data: vec![Measurement {
                    name: "Hemoglobin".to_string(),
                    value: 9.5,
                    unit: "g/dl".to_string(),
                    status: MeasurementStatus::Low,
                    reference_range: "12 - 17.5 g/dL".to_string(),
                }],
                raw_text: "Hemoglobin: 9.5 g/dl".to_string(),
            }
        );
    }

    #[test]
    fn test_glucose_high_and_sodium_normal() {
        let data = scan("Glucose 250 mg/dl\nSodium 140 meq/l");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].name, "Glucose");
        assert_eq!(data[0].status, MeasurementStatus::High);
        assert_eq!(data[1].name, "Sodium");
        assert_eq!(data[1].unit, "meq/l");
        assert_eq!(data[1].status, MeasurementStatus::Normal);
        assert_eq!(data[1].reference_range, "136 - 145 mEq/L");
    }

    #[test]
    fn test_unit_is_case_insensitive_and_kept_as_written() {
        let data = scan("Creatinine: 1.8 MG/DL");
        assert_eq!(data[0].unit, "MG/DL");
        assert_eq!(data[0].status, MeasurementStatus::High);
    }

    #[test]
    fn test_every_recognized_unit_is_captured() {
        for unit in RECOGNIZED_UNITS {
            let data = scan(&format!("Sodium 140 {unit}"));
            assert_eq!(data[0].unit, unit, "unit {unit}");

            let upper = unit.to_uppercase();
            let data = scan(&format!("Sodium 140 {upper}"));
            assert_eq!(data[0].unit, upper, "unit {upper}");
        }
    }

    #[test]
    fn test_label_characters_are_ascii_only() {
        // Long s and the Kelvin sign case-fold to ASCII letters but are not labels.
        let data = scan("\u{17F}odium 140\n\u{212A}alium 4");
        let names: Vec<&str> = data.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["odium", "alium"]);
        assert_eq!(data[0].reference_range, "");
    }

    #[test]
    fn test_missing_unit_defaults_to_empty() {
        let data = scan("Potassium 4.1");
        assert_eq!(data[0].unit, "");
        assert_eq!(data[0].status, MeasurementStatus::Normal);
    }

    #[test]
    fn test_unknown_analyte_is_normal_without_range() {
        let data = scan("Ferritin 900");
        assert_eq!(data[0].status, MeasurementStatus::Normal);
        assert_eq!(data[0].reference_range, "");
    }

    #[test]
    fn test_multiple_matches_per_line_in_order() {
        let data = scan("WBC 12000 Platelets 90000");
        let names: Vec<&str> = data.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["WBC", "Platelets"]);
        assert_eq!(data[0].status, MeasurementStatus::High);
        assert_eq!(data[1].status, MeasurementStatus::Low);
    }

    #[test]
    fn test_repeated_analytes_are_not_merged() {
        let data = scan("Glucose 90\nGlucose 120");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].status, MeasurementStatus::Normal);
        assert_eq!(data[1].status, MeasurementStatus::High);
    }

    #[test]
    fn test_overlapping_keys_use_table_order() {
        let data = scan("RBC WBC index 5");
        assert_eq!(data[0].name, "RBC WBC index");
        // Classified against wbc (4000 - 11000), not rbc (4.2 - 5.9).
        assert_eq!(data[0].status, MeasurementStatus::Low);
        assert_eq!(data[0].reference_range, "4000 - 11000 cells/mcL");
    }

    #[test]
    fn test_long_labels_are_discarded() {
        let prose = format!("{} 12", "word ".repeat(12));
        assert!(scan(&prose).is_empty());
    }

    #[test]
    fn test_imaging_fallback() {
        let text = "Chest PA view\n\n  \nNo focal consolidation\nHeart size normal\n";
        let result = parse_measurements(text, ReportCategory::Xray);
        assert_eq!(
            result,
            ExtractionResult::Imaging {
                findings: vec![
                    "Chest PA view".to_string(),
                    "No focal consolidation".to_string(),
                    "Heart size normal".to_string(),
                ],
                raw_text: text.to_string(),
            }
        );
    }

    #[test]
    fn test_imaging_findings_capped() {
        let text = (0..30)
            .map(|i| format!("finding line {}", "x".repeat(i % 3 + 1)))
            .collect::<Vec<_>>()
            .join("\n");
        let result = parse_measurements(&text, ReportCategory::Mri);
        match result {
            ExtractionResult::Imaging { findings, raw_text } => {
                assert_eq!(findings.len(), 20);
                assert_eq!(raw_text, text);
            }
            other => panic!("expected imaging, got {other:?}"),
        }
    }

    #[test]
    fn test_unstructured_fallback() {
        let text = "Patient reports mild fatigue.";
        let result = parse_measurements(text, ReportCategory::Bloodtest);
        assert_eq!(
            result,
            ExtractionResult::Unstructured {
                raw_text: text.to_string()
            }
        );
    }

    #[test]
    fn test_empty_text_is_unstructured() {
        for category in ReportCategory::ALL {
            assert_eq!(
                parse_measurements("", category),
                ExtractionResult::Unstructured {
                    raw_text: String::new()
                }
            );
        }
    }

    #[test]
    fn test_structured_wins_for_imaging_category() {
        let result = parse_measurements("Lesion size 12 mm", ReportCategory::Ctscan);
        assert_eq!(result.kind(), "structured");
    }

    #[test]
    fn test_idempotent() {
        let text = "Hemoglobin 13\nGlucose: 110 mg/dl\nnotes";
        assert_eq!(
            parse_measurements(text, ReportCategory::Labtest),
            parse_measurements(text, ReportCategory::Labtest)
        );
    }

    #[test]
    fn test_custom_label_limit() {
        let config = EngineConfig {
            max_label_len: 5,
            ..Default::default()
        };
        let result = parse_measurements_with_config("Glucose 90", ReportCategory::Bloodtest, &config);
        assert_eq!(result.kind(), "unstructured");
    }
}
