//! Report text sources.
//!
//! Reads the text-based upload formats directly. Images and PDF need OCR or
//! a PDF parser, which live outside this crate; asking for them here yields
//! [`EngineError::ExternalExtractorRequired`].
//!
//! CSV is flattened to one line per record with fields joined by a space.
//! XML is returned unchanged; no JSON rendering of the document is produced.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use medlens_types::ReportFormat;

use crate::types::{EngineConfig, EngineError, EngineResult};

/// Reads the text of a report file using the default limits.
pub fn extract_text<P: AsRef<Path>>(path: P) -> EngineResult<String> {
    extract_text_with_config(path, &EngineConfig::default())
}

/// Reads the text of a report file.
///
/// # Errors
/// Returns an error if the file is missing, too large, of an unknown format,
/// needs an external extractor, or cannot be read.
pub fn extract_text_with_config<P: AsRef<Path>>(
    path: P,
    config: &EngineConfig,
) -> EngineResult<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EngineError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let format = ReportFormat::from_path(path).map_err(|e| EngineError::UnsupportedFormat {
        extension: e.0,
    })?;

    if format.needs_external_extractor() {
        return Err(EngineError::ExternalExtractorRequired { format });
    }

    let size = fs::metadata(path)?.len();
    if size > config.max_report_bytes {
        return Err(EngineError::FileTooLarge {
            size,
            limit: config.max_report_bytes,
        });
    }

    match format {
        ReportFormat::Csv => csv_to_text(BufReader::new(File::open(path)?)),
        _ => Ok(fs::read_to_string(path)?),
    }
}

/// Flattens CSV input into one line per record.
///
/// Fields are trimmed, empty fields dropped and the rest joined with a single
/// space, so `Glucose,250,mg/dl` becomes `Glucose 250 mg/dl`. Rows may have
/// differing lengths and no header row is assumed.
pub fn csv_to_text<R: Read>(reader: R) -> EngineResult<String> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut lines = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record
            .iter()
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}
