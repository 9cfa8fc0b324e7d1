//! Request handlers

use super::AppState;
use crate::draft::MarketDraft;
use crate::pipeline::PipelineError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /generate-market`
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response envelope shared by success and failure
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error classification, e.g. `fetch` or `generation`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Envelope {
    fn ok(market: MarketDraft) -> Self {
        Self {
            success: true,
            market: Some(market),
            error: None,
            kind: None,
        }
    }

    fn failure(kind: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            market: None,
            error: Some(error.into()),
            kind: Some(kind.to_string()),
        }
    }
}

fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        PipelineError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /generate-market`
pub async fn generate_market(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<Envelope>) {
    let request: GenerateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected malformed request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(Envelope::failure(
                    "invalid_request",
                    format!("Invalid JSON body: {}", e),
                )),
            );
        }
    };

    let url = request.url.unwrap_or_default();
    match state.generator.generate(&url).await {
        Ok(draft) => (StatusCode::OK, Json(Envelope::ok(draft))),
        Err(e) => (
            status_for(&e),
            Json(Envelope::failure(e.kind(), e.to_string())),
        ),
    }
}

/// Bare `OPTIONS` without CORS request headers
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
