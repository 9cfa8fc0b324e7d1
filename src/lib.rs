//! quickbet: instant prediction market drafts from any link
//!
//! This library provides the core components for:
//! - Page metadata extraction (Open Graph, Twitter Card, plain HTML)
//! - Market drafting through a forced function call on a hosted model
//! - Best-effort hero image and topic icon generation
//! - The URL-to-draft pipeline and its HTTP API
//! - A local mock market book with listing and bet quotes
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod draft;
pub mod llm;
pub mod market;
pub mod metadata;
pub mod pipeline;
pub mod server;
pub mod telemetry;
