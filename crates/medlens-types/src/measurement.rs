//! Measurement type.
//!
//! This module provides the `Measurement` struct representing one numeric
//! reading found in report text, together with its classification.

use std::fmt;

/// Classification of a reading against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MeasurementStatus {
    /// Within the reference range, or no range known.
    #[default]
    Normal,
    /// Above the upper bound.
    High,
    /// Below the lower bound.
    Low,
}

impl MeasurementStatus {
    /// Returns the lowercase status code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Low => "low",
        }
    }

    /// Returns true for high and low readings.
    pub fn is_abnormal(self) -> bool {
        self != Self::Normal
    }
}

impl fmt::Display for MeasurementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled numeric reading extracted from report text.
///
/// # Examples
///
/// ```
/// use medlens_types::{Measurement, MeasurementStatus};
///
/// let reading = Measurement {
///     name: "Hemoglobin".to_string(),
///     value: 9.5,
///     unit: "g/dl".to_string(),
///     status: MeasurementStatus::Low,
///     reference_range: "12 - 17.5 g/dL".to_string(),
/// };
///
/// assert!(reading.is_abnormal());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Measurement {
    /// Label as it appeared in the text, trimmed.
    pub name: String,
    /// Parsed numeric value.
    pub value: f64,
    /// Unit token as written, or empty when absent.
    pub unit: String,
    /// Classification against the matched reference range.
    pub status: MeasurementStatus,
    /// `"min - max unit"` of the matched range, or empty when none matched.
    pub reference_range: String,
}

impl Measurement {
    /// Returns true if the reading is outside its reference range.
    pub fn is_abnormal(&self) -> bool {
        self.status.is_abnormal()
    }

    /// Returns the value as it is shown in explanations and chat replies.
    pub fn value_text(&self) -> String {
        format_value(self.value)
    }
}

/// Formats a number with the shortest round-trip digits.
///
/// Plain decimal notation is used when the decimal exponent lies in
/// `-7 < e < 21`; anything outside switches to exponent form with an explicit
/// sign, such as `1e-7` or `1.2345678901234568e+21`. Integral values carry no
/// fractional part.
///
/// # Examples
///
/// ```
/// use medlens_types::format_value;
///
/// assert_eq!(format_value(12.0), "12");
/// assert_eq!(format_value(9.5), "9.5");
/// assert_eq!(format_value(0.0000001), "1e-7");
/// ```
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest digits, e.g. "1.2345e2".
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(n.unsigned_abs() as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{first}e{sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exponent.abs())
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}
