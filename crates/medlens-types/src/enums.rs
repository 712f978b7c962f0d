//! Report vocabulary enumerations.
//!
//! This module provides enum representations for the caller-supplied codes that
//! steer extraction and explanation: report category, explanation mode, output
//! language and uploaded file format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Error returned when a report category code is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid report type: '{}' (expected one of xray, mri, ctscan, bloodtest, labtest, handwritten)",
            self.0
        )
    }
}

impl std::error::Error for ParseCategoryError {}

/// Error returned when a file extension is not an accepted report format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormatError(pub String);

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported report format: '{}'", self.0)
    }
}

impl std::error::Error for ParseFormatError {}

/// Category of an uploaded medical report, declared by the uploader.
///
/// The category only influences extraction when no measurements are found:
/// imaging categories fall back to a findings list instead of raw text.
///
/// # Examples
///
/// ```
/// use medlens_types::ReportCategory;
///
/// let category: ReportCategory = "xray".parse().unwrap();
/// assert!(category.is_imaging());
/// assert!("ultrasound".parse::<ReportCategory>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReportCategory {
    /// Plain radiograph.
    Xray,
    /// Magnetic resonance imaging.
    Mri,
    /// Computed tomography.
    Ctscan,
    /// Blood panel.
    Bloodtest,
    /// Other laboratory test.
    Labtest,
    /// Handwritten note or prescription.
    Handwritten,
}

impl ReportCategory {
    /// All categories in declaration order.
    pub const ALL: [ReportCategory; 6] = [
        Self::Xray,
        Self::Mri,
        Self::Ctscan,
        Self::Bloodtest,
        Self::Labtest,
        Self::Handwritten,
    ];

    /// Returns the wire code for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xray => "xray",
            Self::Mri => "mri",
            Self::Ctscan => "ctscan",
            Self::Bloodtest => "bloodtest",
            Self::Labtest => "labtest",
            Self::Handwritten => "handwritten",
        }
    }

    /// Returns true for imaging categories (xray, mri, ctscan).
    pub fn is_imaging(self) -> bool {
        matches!(self, Self::Xray | Self::Mri | Self::Ctscan)
    }
}

impl FromStr for ReportCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience an explanation is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExplanationMode {
    /// Plain-language summary for the patient.
    #[default]
    Patient,
    /// Tabular summary for a clinician.
    Clinician,
}

impl ExplanationMode {
    /// Maps a request code to a mode.
    ///
    /// Only `"patient"` selects the patient audience; every other value is
    /// treated as a clinician request.
    pub fn from_code(code: &str) -> Self {
        if code == "patient" {
            Self::Patient
        } else {
            Self::Clinician
        }
    }

    /// Returns the wire code for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Clinician => "clinician",
        }
    }
}

/// Output language for generated explanations.
///
/// Only the disclaimer is translated; the body templates are English.
///
/// # Examples
///
/// ```
/// use medlens_types::Language;
///
/// assert_eq!(Language::from_code("tamil"), Language::Tamil);
/// // Unknown codes fall back to English.
/// assert_eq!(Language::from_code("french"), Language::English);
/// assert_eq!(Language::parse_strict("french"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    /// English (fallback language).
    #[default]
    English,
    /// Tamil.
    Tamil,
    /// Hindi.
    Hindi,
}

impl Language {
    /// English medical disclaimer.
    pub const ENGLISH_DISCLAIMER: &'static str =
        "⚠️ MEDICAL DISCLAIMER: This is for educational purposes only. Always consult a healthcare professional.";
    /// Tamil medical disclaimer.
    pub const TAMIL_DISCLAIMER: &'static str =
        "⚠️ மருத்துவ மறுப்பு: இது கல்வி நோக்கங்களுக்காக மட்டுமே. மருத்துவரை அணுகவும்.";
    /// Hindi medical disclaimer.
    pub const HINDI_DISCLAIMER: &'static str =
        "⚠️ चिकित्सा अस्वीकरण: यह केवल शैक्षिक उद्देश्यों के लिए है। डॉक्टर से परामर्श करें।";

    /// Parses a language code, returning `None` for unknown codes.
    pub fn parse_strict(code: &str) -> Option<Self> {
        match code {
            "english" => Some(Self::English),
            "tamil" => Some(Self::Tamil),
            "hindi" => Some(Self::Hindi),
            _ => None,
        }
    }

    /// Parses a language code, falling back to English for unknown codes.
    pub fn from_code(code: &str) -> Self {
        Self::parse_strict(code).unwrap_or(Self::English)
    }

    /// Returns the wire code for this language.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Tamil => "tamil",
            Self::Hindi => "hindi",
        }
    }

    /// Returns the medical disclaimer that prefixes every explanation.
    pub fn disclaimer(self) -> &'static str {
        match self {
            Self::English => Self::ENGLISH_DISCLAIMER,
            Self::Tamil => Self::TAMIL_DISCLAIMER,
            Self::Hindi => Self::HINDI_DISCLAIMER,
        }
    }
}

/// Accepted upload file format, identified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReportFormat {
    /// JPEG image (`.jpg`).
    Jpg,
    /// JPEG image (`.jpeg`).
    Jpeg,
    /// PNG image.
    Png,
    /// PDF document.
    Pdf,
    /// Comma-separated values.
    Csv,
    /// XML document.
    Xml,
}

impl ReportFormat {
    /// Maximum accepted upload size in bytes (10 MiB).
    pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

    /// Parses a file extension, case-insensitively and with or without a
    /// leading dot.
    pub fn from_extension(ext: &str) -> Result<Self, ParseFormatError> {
        let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            _ => Err(ParseFormatError(ext.to_string())),
        }
    }

    /// Detects the format from a file path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ParseFormatError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    /// Returns the canonical extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Xml => "xml",
        }
    }

    /// Returns true for raster image formats.
    pub fn is_image(self) -> bool {
        matches!(self, Self::Jpg | Self::Jpeg | Self::Png)
    }

    /// Returns true when text must come from OCR or a PDF parser.
    pub fn needs_external_extractor(self) -> bool {
        self.is_image() || self == Self::Pdf
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_category_codes() {
        for category in ReportCategory::ALL {
            assert_eq!(category.as_str().parse::<ReportCategory>(), Ok(category));
        }
        assert!("XRAY".parse::<ReportCategory>().is_err());
        assert!("".parse::<ReportCategory>().is_err());
    }

    #[test]
    fn test_imaging_categories() {
        assert!(ReportCategory::Xray.is_imaging());
        assert!(ReportCategory::Mri.is_imaging());
        assert!(ReportCategory::Ctscan.is_imaging());
        assert!(!ReportCategory::Bloodtest.is_imaging());
        assert!(!ReportCategory::Labtest.is_imaging());
        assert!(!ReportCategory::Handwritten.is_imaging());
    }

    #[test]
    fn test_mode_from_code() {
        assert_eq!(ExplanationMode::from_code("patient"), ExplanationMode::Patient);
        assert_eq!(ExplanationMode::from_code("clinician"), ExplanationMode::Clinician);
        assert_eq!(ExplanationMode::from_code("doctor"), ExplanationMode::Clinician);
    }

    #[test]
    fn test_language_fallback() {
        assert_eq!(Language::from_code("hindi"), Language::Hindi);
        assert_eq!(Language::from_code("french"), Language::English);
        assert_eq!(Language::from_code(""), Language::English);
        assert_eq!(Language::from_code("french").disclaimer(), Language::ENGLISH_DISCLAIMER);
    }

    #[test]
    fn test_report_format_from_extension() {
        assert_eq!(ReportFormat::from_extension("PDF"), Ok(ReportFormat::Pdf));
        assert_eq!(ReportFormat::from_extension(".csv"), Ok(ReportFormat::Csv));
        assert!(ReportFormat::from_extension("docx").is_err());
        assert_eq!(
            ReportFormat::from_path(Path::new("/tmp/scan.JPEG")),
            Ok(ReportFormat::Jpeg)
        );
        assert!(ReportFormat::from_path(Path::new("/tmp/noext")).is_err());
    }

    #[test]
    fn test_external_extractor_formats() {
        assert!(ReportFormat::Png.needs_external_extractor());
        assert!(ReportFormat::Pdf.needs_external_extractor());
        assert!(!ReportFormat::Csv.needs_external_extractor());
        assert!(!ReportFormat::Xml.needs_external_extractor());
    }
}
