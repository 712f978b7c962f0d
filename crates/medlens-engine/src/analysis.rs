//! Analysis entry points.
//!
//! Combines text sources, extraction and explanation. Includes batch support
//! via rayon when the `parallel` feature is enabled.

use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use medlens_types::{ExplanationMode, ExplanationPair, ExtractionResult, Language, ReportCategory};

use crate::explain::generate_explanation_with_config;
use crate::parser::parse_measurements_with_config;
use crate::source::extract_text_with_config;
use crate::types::{BatchStats, EngineConfig, EngineError, EngineResult};

/// Extraction result and its explanations for one report.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Structured, imaging or unstructured representation of the text.
    pub extracted: ExtractionResult,
    /// Short and long explanations.
    pub explanation: ExplanationPair,
}

/// One report file to analyse in a batch.
#[derive(Debug, Clone)]
pub struct ReportJob {
    /// Path to the report file.
    pub path: PathBuf,
    /// Declared report category.
    pub category: ReportCategory,
    /// Explanation audience.
    pub mode: ExplanationMode,
    /// Explanation language.
    pub language: Language,
}

/// Runs extraction and explanation with a fixed configuration.
///
/// # Example
///
/// ```
/// use medlens_engine::ReportAnalyzer;
/// use medlens_types::{ExplanationMode, Language, ReportCategory};
///
/// let analyzer = ReportAnalyzer::default();
/// let analysis = analyzer
///     .analyze("Sodium 140 meq/l", ReportCategory::Bloodtest, ExplanationMode::Clinician, Language::English)
///     .unwrap();
/// assert_eq!(analysis.extracted.kind(), "structured");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportAnalyzer {
    config: EngineConfig,
}

impl ReportAnalyzer {
    /// Creates an analyzer with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the analyzer configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyses already-extracted report text.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyText`] when the text is blank.
    pub fn analyze(
        &self,
        text: &str,
        category: ReportCategory,
        mode: ExplanationMode,
        language: Language,
    ) -> EngineResult<Analysis> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyText);
        }

        let extracted = parse_measurements_with_config(text, category, &self.config);
        let explanation = generate_explanation_with_config(&extracted, mode, language, &self.config);

        Ok(Analysis {
            extracted,
            explanation,
        })
    }

    /// Reads a report file and analyses its text.
    pub fn analyze_file<P: AsRef<Path>>(
        &self,
        path: P,
        category: ReportCategory,
        mode: ExplanationMode,
        language: Language,
    ) -> EngineResult<Analysis> {
        let text = extract_text_with_config(path, &self.config)?;
        self.analyze(&text, category, mode, language)
    }

    fn run_job(&self, job: &ReportJob) -> EngineResult<Analysis> {
        let result = self.analyze_file(&job.path, job.category, job.mode, job.language);
        if let Err(e) = &result {
            tracing::warn!(path = %job.path.display(), error = %e, "report analysis failed");
        }
        result
    }

    /// Analyses report files one after another.
    ///
    /// Results are in job order.
    pub fn analyze_batch_sequential(&self, jobs: &[ReportJob]) -> Vec<EngineResult<Analysis>> {
        jobs.iter().map(|job| self.run_job(job)).collect()
    }

    /// Analyses report files in parallel.
    ///
    /// Results are in job order.
    #[cfg(feature = "parallel")]
    pub fn analyze_batch_parallel(&self, jobs: &[ReportJob]) -> Vec<EngineResult<Analysis>> {
        jobs.par_iter().map(|job| self.run_job(job)).collect()
    }

    /// Analyses report files, in parallel when the `parallel` feature is on.
    pub fn analyze_batch(&self, jobs: &[ReportJob]) -> Vec<EngineResult<Analysis>> {
        #[cfg(feature = "parallel")]
        let results = self.analyze_batch_parallel(jobs);
        #[cfg(not(feature = "parallel"))]
        let results = self.analyze_batch_sequential(jobs);

        let stats = batch_stats(&results);
        tracing::info!(
            total = stats.total_jobs,
            analyzed = stats.analyzed,
            failed = stats.failed,
            structured = stats.structured,
            "batch analysis finished"
        );
        results
    }
}

/// Summarizes the outcome of a batch run.
pub fn batch_stats(results: &[EngineResult<Analysis>]) -> BatchStats {
    let mut stats = BatchStats {
        total_jobs: results.len(),
        ..Default::default()
    };
    for result in results {
        match result {
            Ok(analysis) => {
                stats.analyzed += 1;
                if matches!(analysis.extracted, ExtractionResult::Structured { .. }) {
                    stats.structured += 1;
                }
            }
            Err(_) => stats.failed += 1,
        }
    }
    stats
}

/// Analyses report text with the default configuration.
pub fn analyze(
    text: &str,
    category: ReportCategory,
    mode: ExplanationMode,
    language: Language,
) -> EngineResult<Analysis> {
    ReportAnalyzer::default().analyze(text, category, mode, language)
}

/// Reads and analyses a report file with the default configuration.
pub fn analyze_file<P: AsRef<Path>>(
    path: P,
    category: ReportCategory,
    mode: ExplanationMode,
    language: Language,
) -> EngineResult<Analysis> {
    ReportAnalyzer::default().analyze_file(path, category, mode, language)
}

/// Analyses report files with the default configuration.
pub fn analyze_batch(jobs: &[ReportJob]) -> Vec<EngineResult<Analysis>> {
    ReportAnalyzer::default().analyze_batch(jobs)
}
