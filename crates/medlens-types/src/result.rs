//! Extraction and explanation results.

use crate::Measurement;

/// Outcome of scanning report text.
///
/// Exactly one variant is produced per extraction. With the `serde` feature
/// the enum serializes with a `type` discriminator of `"structured"`,
/// `"imaging"` or `"unstructured"`.
///
/// # Examples
///
/// ```
/// use medlens_types::ExtractionResult;
///
/// let result = ExtractionResult::Unstructured { raw_text: String::new() };
/// assert_eq!(result.kind(), "unstructured");
/// assert_eq!(result.raw_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum ExtractionResult {
    /// At least one measurement was found.
    Structured {
        /// Measurements in encounter order.
        data: Vec<Measurement>,
        /// The full input text.
        #[cfg_attr(feature = "serde", serde(rename = "rawText"))]
        raw_text: String,
    },
    /// No measurements in an imaging report.
    Imaging {
        /// Non-blank lines of the text, at most 20.
        findings: Vec<String>,
        /// The full input text.
        #[cfg_attr(feature = "serde", serde(rename = "rawText"))]
        raw_text: String,
    },
    /// No measurements and not an imaging report.
    Unstructured {
        /// The full input text.
        #[cfg_attr(feature = "serde", serde(rename = "rawText"))]
        raw_text: String,
    },
}

impl ExtractionResult {
    /// Returns the discriminator code of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structured { .. } => "structured",
            Self::Imaging { .. } => "imaging",
            Self::Unstructured { .. } => "unstructured",
        }
    }

    /// Returns the original text the result was extracted from.
    pub fn raw_text(&self) -> &str {
        match self {
            Self::Structured { raw_text, .. }
            | Self::Imaging { raw_text, .. }
            | Self::Unstructured { raw_text } => raw_text,
        }
    }

    /// Returns the measurements of a structured result, or an empty slice.
    pub fn measurements(&self) -> &[Measurement] {
        match self {
            Self::Structured { data, .. } => data,
            _ => &[],
        }
    }

    /// Returns the measurements outside their reference range.
    pub fn abnormal(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements().iter().filter(|m| m.is_abnormal())
    }
}

/// Short and long explanation texts for one analysis.
///
/// Both texts start with the language's disclaimer followed by a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExplanationPair {
    /// Summary text.
    pub short_explanation: String,
    /// Itemized text.
    pub long_explanation: String,
}
