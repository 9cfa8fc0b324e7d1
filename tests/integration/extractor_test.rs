//! Metadata extraction over real HTTP

use crate::common::*;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use quickbet::config::FetchConfig;
use quickbet::metadata::{FetchError, MetadataExtractor};
use std::time::Duration;

#[tokio::test]
async fn test_extract_open_graph_page() {
    let (url, hits) = spawn_page(OG_PAGE).await;

    let metadata = MetadataExtractor::with_config(fetch_config())
        .extract(&url)
        .await
        .unwrap();

    assert_eq!(metadata.title, "Will X happen?");
    assert_eq!(metadata.description, "Context about X");
    assert_eq!(metadata.image.as_deref(), Some("https://example.com/x.png"));
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_extract_twitter_fallback() {
    let (url, _) = spawn_page(
        r#"<html><head>
            <title>Plain title</title>
            <meta name="twitter:title" content="Rates &amp; inflation">
            <meta name='twitter:description' content='Will the Fed cut?'>
            <meta content="https://cdn.example.com/card.jpg" name="twitter:image:src">
        </head></html>"#,
    )
    .await;

    let metadata = MetadataExtractor::with_config(fetch_config())
        .extract(&url)
        .await
        .unwrap();

    assert_eq!(metadata.title, "Rates & inflation");
    assert_eq!(metadata.description, "Will the Fed cut?");
    assert_eq!(
        metadata.image.as_deref(),
        Some("https://cdn.example.com/card.jpg")
    );
}

#[tokio::test]
async fn test_relative_image_resolved_against_page() {
    let app = Router::new().route(
        "/news/story",
        get(|| async {
            Html(r#"<meta property="og:image" content="/media/lead.png"><title>Story</title>"#)
        }),
    );
    let addr = spawn(app).await;

    let metadata = MetadataExtractor::with_config(fetch_config())
        .extract(&format!("http://{}/news/story", addr))
        .await
        .unwrap();

    assert_eq!(metadata.title, "Story");
    assert_eq!(
        metadata.image,
        Some(format!("http://{}/media/lead.png", addr))
    );
}

#[tokio::test]
async fn test_browser_user_agent_sent() {
    async fn guarded(headers: HeaderMap) -> impl IntoResponse {
        let agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if agent.starts_with("Mozilla/5.0") {
            Html(OG_PAGE).into_response()
        } else {
            StatusCode::FORBIDDEN.into_response()
        }
    }
    let addr = spawn(Router::new().route("/", get(guarded))).await;
    let url = format!("http://{}/", addr);

    let metadata = MetadataExtractor::with_config(fetch_config())
        .extract(&url)
        .await
        .unwrap();
    assert_eq!(metadata.title, "Will X happen?");

    let bot = MetadataExtractor::with_config(FetchConfig {
        user_agent: "quickbet-bot/1.0".to_string(),
        ..fetch_config()
    });
    let err = bot.extract(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 403, .. }));
}

#[tokio::test]
async fn test_body_truncated_before_parsing() {
    let (url, _) = spawn_page(
        r#"<html><head><title>Early</title></head><body><p>padding padding padding padding</p>
        <meta property="og:description" content="Too late to be seen"></body></html>"#,
    )
    .await;

    let extractor = MetadataExtractor::with_config(FetchConfig {
        max_body_bytes: 48,
        ..fetch_config()
    });
    let metadata = extractor.extract(&url).await.unwrap();

    assert_eq!(metadata.title, "Early");
    assert!(metadata.description.is_empty());
}

#[tokio::test]
async fn test_empty_page_is_not_an_error() {
    let (url, _) = spawn_page(BARE_PAGE).await;

    let metadata = MetadataExtractor::with_config(fetch_config())
        .extract(&url)
        .await
        .unwrap();

    assert!(metadata.is_empty());
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let app = Router::new().route(
        "/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Html(OG_PAGE)
        }),
    );
    let addr = spawn(app).await;

    let extractor = MetadataExtractor::with_config(FetchConfig {
        timeout_secs: quick_timeout().as_secs(),
        ..fetch_config()
    });
    let err = extractor
        .extract(&format!("http://{}/", addr))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { secs: 1, .. }));
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let addr = refused_addr().await;

    let err = MetadataExtractor::with_config(fetch_config())
        .extract(&format!("http://{}/", addr))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network { .. }));
}

#[tokio::test]
async fn test_endless_page_stops_at_byte_cap() {
    let addr = spawn_endless_page("<html><head><title>Early</title></head><body>").await;

    let extractor = MetadataExtractor::with_config(FetchConfig {
        max_body_bytes: 256,
        timeout_secs: 2,
        ..fetch_config()
    });
    let metadata = extractor
        .extract(&format!("http://{}/", addr))
        .await
        .unwrap();

    assert_eq!(metadata.title, "Early");
}
