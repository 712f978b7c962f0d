//! # medlens-engine
//!
//! Measurement extraction and reference-range classification for medical
//! report text, with templated explanations.
//!
//! The two core operations are pure and infallible:
//!
//! - [`parse_measurements`] scans text for labelled numeric readings and
//!   classifies them, falling back to imaging findings or raw text.
//! - [`generate_explanation`] renders patient or clinician explanations with a
//!   language-specific disclaimer.
//!
//! Around them sit file text sources ([`source`]), analysis entry points with
//! batch support, and a keyword chat responder ([`chat`]).
//!
//! ## Behavior notes
//!
//! Callers migrating from the upload pipeline should expect three differences:
//!
//! - CSV reports are flattened record by record, fields joined with a single
//!   space, so a row like `Hemoglobin,9.5,g/dl` is scanned as
//!   `Hemoglobin 9.5 g/dl` and yields a structured result. Reading the raw CSV
//!   would leave the commas in place and produce unstructured text.
//! - XML reports are passed through verbatim. They are not converted to a
//!   JSON rendering before scanning.
//! - Chat greetings (`hello`, `hi`, `hey`) must appear as whole words, so
//!   messages containing "this" or "which" are not answered as greetings.
//!
//! ## Features
//!
//! - `parallel` (default): batch analysis on the rayon thread pool.
//!
//! ## Usage
//!
//! ```rust
//! use medlens_engine::{generate_explanation, parse_measurements};
//! use medlens_types::{ExplanationMode, Language, MeasurementStatus, ReportCategory};
//!
//! let result = parse_measurements("Sodium 140 meq/l", ReportCategory::Bloodtest);
//! assert_eq!(result.measurements()[0].status, MeasurementStatus::Normal);
//!
//! let pair = generate_explanation(&result, ExplanationMode::Clinician, Language::Hindi);
//! assert!(pair.long_explanation.contains("| Sodium | 140 | meq/l | NORMAL |"));
//! ```

#![warn(missing_docs)]

mod analysis;
pub mod chat;
mod explain;
pub mod parser;
pub mod reference;
pub mod source;
mod types;

pub use analysis::{analyze, analyze_batch, analyze_file, batch_stats, Analysis, ReportAnalyzer, ReportJob};
pub use explain::{generate_explanation, generate_explanation_with_config};
pub use parser::{parse_measurements, parse_measurements_with_config, MeasurementScanner};
pub use source::{csv_to_text, extract_text, extract_text_with_config};
pub use types::{BatchStats, EngineConfig, EngineError, EngineResult};

// Re-export medlens-types for convenience
pub use medlens_types;
