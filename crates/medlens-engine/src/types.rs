//! Engine-specific error and configuration types.

use medlens_types::ReportFormat;
use thiserror::Error;

/// Errors that can occur while turning a report file into an analysis.
///
/// Text scanning and explanation never fail; these errors belong to the
/// steps around them (reading the file, rejecting blank text).
#[derive(Error, Debug)]
pub enum EngineError {
    /// I/O error reading a report file.
    #[error("IO error reading report file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// File extension is not an accepted report format.
    #[error("Unsupported report format: {extension}")]
    UnsupportedFormat {
        /// The rejected extension.
        extension: String,
    },

    /// Text for this format must come from OCR or a PDF parser.
    #[error("Report format '{format}' requires an external text extractor")]
    ExternalExtractorRequired {
        /// The format that cannot be read directly.
        format: ReportFormat,
    },

    /// File exceeds the upload size limit.
    #[error("Report file is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        /// Actual file size.
        size: u64,
        /// Configured limit.
        limit: u64,
    },

    /// Extraction produced no usable text.
    #[error("Unable to extract text from report")]
    EmptyText,

    /// Report category code is not recognized.
    #[error("Invalid report type: {value}")]
    InvalidReportCategory {
        /// The rejected code.
        value: String,
    },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Tunables for extraction and explanation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Labels with this many characters or more are discarded as prose.
    pub max_label_len: usize,
    /// Maximum number of findings kept for an imaging result.
    pub max_imaging_findings: usize,
    /// Number of findings shown in the short imaging explanation.
    pub imaging_summary_findings: usize,
    /// Characters of raw text shown in the short unstructured explanation.
    pub preview_chars: usize,
    /// Largest report file accepted by the text sources.
    pub max_report_bytes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_label_len: 50,
            max_imaging_findings: 20,
            imaging_summary_findings: 5,
            preview_chars: 300,
            max_report_bytes: ReportFormat::MAX_UPLOAD_BYTES,
        }
    }
}

/// Counts from a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Jobs submitted.
    pub total_jobs: usize,
    /// Jobs that produced an analysis.
    pub analyzed: usize,
    /// Jobs that failed before analysis.
    pub failed: usize,
    /// Structured results among the analyzed jobs.
    pub structured: usize,
}

impl BatchStats {
    /// Returns the percentage of jobs that produced an analysis.
    pub fn success_rate(&self) -> f64 {
        if self.total_jobs == 0 {
            0.0
        } else {
            (self.analyzed as f64 / self.total_jobs as f64) * 100.0
        }
    }
}
