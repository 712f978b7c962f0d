//! # medlens-service
//!
//! HTTP JSON service for medical report analysis.
//!
//! Exposes the extraction, explanation and chat operations of the
//! medlens-engine crate:
//!
//! - `GET /health`
//! - `POST /analyze` with `{ text, reportType, mode?, language? }`
//! - `POST /chat` with `{ message, extractedText, extractedData? }`

#![warn(missing_docs)]

pub mod config;
pub mod error;
mod server;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use server::{
    AnalyzeData, AnalyzeRequest, AnalyzeResponse, ChatRequest, ChatResponse, HealthResponse,
    MedlensServer,
};

/// Builds the router around an analyzer with default configuration.
pub fn router() -> axum::Router {
    MedlensServer::default().router()
}
