//! HTTP handlers and router.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use medlens_engine::chat::{self, ChatContext};
use medlens_engine::{EngineError, ReportAnalyzer};
use medlens_types::{ExplanationMode, ExtractionResult, Language, ReportCategory};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared handler state.
#[derive(Clone, Default)]
pub struct MedlensServer {
    analyzer: Arc<ReportAnalyzer>,
}

impl MedlensServer {
    /// Creates server state around an analyzer.
    pub fn new(analyzer: ReportAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }

    /// Returns the analyzer.
    pub fn analyzer(&self) -> &ReportAnalyzer {
        &self.analyzer
    }

    /// Builds the HTTP router.
    pub fn router(self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/analyze", post(analyze))
            .route("/chat", post(chat))
            .with_state(self)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always true while serving.
    pub ok: bool,
    /// Liveness message.
    pub message: &'static str,
}

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Report text produced by the upstream extractor.
    pub text: String,
    /// Report category code.
    pub report_type: String,
    /// Audience code; anything but `patient` means clinician.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Language code; unknown codes fall back to english.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_mode() -> String {
    ExplanationMode::Patient.as_str().to_string()
}

fn default_language() -> String {
    Language::English.as_str().to_string()
}

/// Payload of a successful analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeData {
    /// Extraction result with its `type` discriminator.
    pub extracted_data: ExtractionResult,
    /// Short explanation.
    pub short_explanation: String,
    /// Long explanation.
    pub long_explanation: String,
    /// Text the analysis ran on.
    pub raw_text: String,
}

/// Response of `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Always true.
    pub success: bool,
    /// Status message.
    pub message: &'static str,
    /// Analysis payload.
    pub data: AnalyzeData,
}

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// User question.
    pub message: String,
    /// Text of the analysed report.
    #[serde(default)]
    pub extracted_text: String,
    /// Stored extraction result, if any.
    #[serde(default)]
    pub extracted_data: Option<ExtractionResult>,
}

/// Response of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Always true.
    pub success: bool,
    /// Reply text.
    pub response: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        message: "medlens is alive",
    })
}

async fn analyze(
    State(server): State<MedlensServer>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let category: ReportCategory = req.report_type.parse().map_err(|_| {
        EngineError::InvalidReportCategory {
            value: req.report_type.clone(),
        }
    })?;
    let mode = ExplanationMode::from_code(&req.mode);
    let language = Language::from_code(&req.language);
    if Language::parse_strict(&req.language).is_none() {
        tracing::debug!(language = %req.language, "unknown language, using english");
    }

    let analysis = server
        .analyzer()
        .analyze(&req.text, category, mode, language)?;

    tracing::info!(
        category = category.as_str(),
        mode = mode.as_str(),
        kind = analysis.extracted.kind(),
        measurements = analysis.extracted.measurements().len(),
        "report analyzed"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        message: "Analysis complete",
        data: AnalyzeData {
            extracted_data: analysis.extracted,
            short_explanation: analysis.explanation.short_explanation,
            long_explanation: analysis.explanation.long_explanation,
            raw_text: req.text,
        },
    }))
}

async fn chat(Json(req): Json<ChatRequest>) -> Result<Json<ChatResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }
    if req.extracted_text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Report has not been analyzed yet".to_string(),
        ));
    }

    let context = ChatContext {
        extracted_text: &req.extracted_text,
        extracted: req.extracted_data.as_ref(),
    };
    let response = chat::respond(&req.message, &context);

    Ok(Json(ChatResponse {
        success: true,
        response,
    }))
}
