//! Reference ranges for known analytes.
//!
//! The table is a process-wide constant. Its order matters: label lookup picks
//! the first key that occurs in the normalized label, so earlier entries win
//! when a label contains several keys.
//!
//! # Examples
//!
//! ```
//! use medlens_types::{reference, MeasurementStatus};
//!
//! let glucose = reference::get("glucose").unwrap();
//! assert_eq!(glucose.display(), "70 - 100 mg/dL");
//! assert_eq!(glucose.classify(250.0), MeasurementStatus::High);
//! ```

use crate::{format_value, MeasurementStatus};

/// Unit tokens recognized after a numeric value, matched case-insensitively.
///
/// The measurement scanner builds its unit alternation from this list, in order.
pub const RECOGNIZED_UNITS: [&str; 8] = [
    "mg/dl",
    "g/dl",
    "%",
    "mmol/l",
    "u/l",
    "cells/mcl",
    "million/mcl",
    "meq/l",
];

/// Normal interval for one analyte.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReferenceRange {
    /// Lookup key, matched as a substring of the normalized label.
    pub key: &'static str,
    /// Lower bound of the normal interval (inclusive).
    pub min: f64,
    /// Upper bound of the normal interval (inclusive).
    pub max: f64,
    /// Display unit.
    pub unit: &'static str,
    /// Human-readable analyte name.
    pub display_name: &'static str,
}

impl ReferenceRange {
    /// Classifies a reading against this interval.
    ///
    /// Both bounds are inclusive: only values strictly below `min` are low and
    /// only values strictly above `max` are high.
    pub fn classify(&self, value: f64) -> MeasurementStatus {
        if value < self.min {
            MeasurementStatus::Low
        } else if value > self.max {
            MeasurementStatus::High
        } else {
            MeasurementStatus::Normal
        }
    }

    /// Formats the interval as `"{min} - {max} {unit}"`.
    pub fn display(&self) -> String {
        format!(
            "{} - {} {}",
            format_value(self.min),
            format_value(self.max),
            self.unit
        )
    }
}

// =============================================================================
// Reference table
// =============================================================================

/// Known analytes in lookup order.
pub const REFERENCE_RANGES: [ReferenceRange; 10] = [
    ReferenceRange {
        key: "hemoglobin",
        min: 12.0,
        max: 17.5,
        unit: "g/dL",
        display_name: "Hemoglobin",
    },
    ReferenceRange {
        key: "hematocrit",
        min: 36.0,
        max: 50.0,
        unit: "%",
        display_name: "Hematocrit",
    },
    ReferenceRange {
        key: "wbc",
        min: 4000.0,
        max: 11000.0,
        unit: "cells/mcL",
        display_name: "White Blood Cells",
    },
    ReferenceRange {
        key: "rbc",
        min: 4.2,
        max: 5.9,
        unit: "million/mcL",
        display_name: "Red Blood Cells",
    },
    ReferenceRange {
        key: "platelets",
        min: 150000.0,
        max: 400000.0,
        unit: "cells/mcL",
        display_name: "Platelets",
    },
    ReferenceRange {
        key: "glucose",
        min: 70.0,
        max: 100.0,
        unit: "mg/dL",
        display_name: "Fasting Glucose",
    },
    ReferenceRange {
        key: "cholesterol",
        min: 0.0,
        max: 200.0,
        unit: "mg/dL",
        display_name: "Total Cholesterol",
    },
    ReferenceRange {
        key: "creatinine",
        min: 0.7,
        max: 1.3,
        unit: "mg/dL",
        display_name: "Creatinine",
    },
    ReferenceRange {
        key: "sodium",
        min: 136.0,
        max: 145.0,
        unit: "mEq/L",
        display_name: "Sodium",
    },
    ReferenceRange {
        key: "potassium",
        min: 3.5,
        max: 5.0,
        unit: "mEq/L",
        display_name: "Potassium",
    },
];

/// Returns the reference range with exactly this key.
pub fn get(key: &str) -> Option<&'static ReferenceRange> {
    REFERENCE_RANGES.iter().find(|range| range.key == key)
}
