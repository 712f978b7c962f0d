//! # medlens-types
//!
//! Type definitions for medical report extraction and explanation.
//!
//! This crate provides the plain data types shared by the extraction engine
//! and its front ends: measurements, extraction results, explanation texts,
//! the static reference-range table and the request vocabulary.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use medlens_types::{reference, Language, Measurement, MeasurementStatus};
//!
//! let hemoglobin = reference::get("hemoglobin").unwrap();
//! let reading = Measurement {
//!     name: "Hemoglobin".to_string(),
//!     value: 9.5,
//!     unit: "g/dl".to_string(),
//!     status: hemoglobin.classify(9.5),
//!     reference_range: hemoglobin.display(),
//! };
//!
//! assert_eq!(reading.status, MeasurementStatus::Low);
//! assert!(Language::from_code("hindi").disclaimer().starts_with("⚠️"));
//! ```

#![warn(missing_docs)]

mod enums;
mod measurement;
pub mod reference;
mod result;

// Re-export all public types at crate root
pub use enums::{
    ExplanationMode, Language, ParseCategoryError, ParseFormatError, ReportCategory, ReportFormat,
};
pub use measurement::{format_value, Measurement, MeasurementStatus};
pub use reference::{ReferenceRange, RECOGNIZED_UNITS, REFERENCE_RANGES};
pub use result::{ExplanationPair, ExtractionResult};
