//! HTTP front door for the generation pipeline
//!
//! `POST /generate-market` runs the pipeline and answers with a JSON
//! envelope. Browser callers get permissive CORS.

mod handlers;

pub use handlers::{Envelope, GenerateRequest};

use crate::config::ServerConfig;
use crate::pipeline::MarketGenerator;
use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state handed to every request
pub struct AppState {
    pub generator: MarketGenerator,
}

impl AppState {
    pub fn new(generator: MarketGenerator) -> Self {
        Self { generator }
    }
}

/// Headers browsers may send on cross-origin calls
fn allowed_headers() -> [HeaderName; 4] {
    [
        header::AUTHORIZATION,
        HeaderName::from_static("x-client-info"),
        HeaderName::from_static("apikey"),
        header::CONTENT_TYPE,
    ]
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/generate-market",
            post(handlers::generate_market).options(handlers::preflight),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(allowed_headers()),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Bind and serve until the process stops
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "quickbet API listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
