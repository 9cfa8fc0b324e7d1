//! Router behavior through `tower::ServiceExt::oneshot`

use crate::common::*;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use quickbet::server::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn app() -> Router {
    let (gateway_url, _) = spawn_gateway(GatewayScript::market(market_arguments())).await;
    router(Arc::new(AppState::new(generator(llm_config(&gateway_url)))))
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/generate-market")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_generate_market_success_envelope() {
    let (page_url, _) = spawn_page(OG_PAGE).await;
    let body = json!({ "url": page_url }).to_string();

    let response = app().await.oneshot(post_json(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let envelope = read_json(response).await;
    assert_eq!(envelope["success"], true);
    assert!(envelope.get("error").is_none());
    let market = &envelope["market"];
    assert_eq!(market["question"], "Will X happen before next Friday?");
    assert_eq!(market["ogTitle"], "X watch");
    assert_eq!(market["ogImage"], "https://example.com/x.png");
    assert_eq!(market["sourceUrl"], page_url.as_str());
    assert_eq!(market["confidence"], 78.0);
    assert!(market.get("iconImage").is_none());
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let response = app().await.oneshot(post_json("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let envelope = read_json(response).await;
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["error"], "URL is required");
    assert_eq!(envelope["kind"], "missing_input");
    assert!(envelope.get("market").is_none());
}

#[tokio::test]
async fn test_relative_url_is_bad_request() {
    let response = app()
        .await
        .oneshot(post_json(r#"{"url": "not a url"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["kind"], "invalid_url");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let response = app().await.oneshot(post_json("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let envelope = read_json(response).await;
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["kind"], "invalid_request");
}

#[tokio::test]
async fn test_fetch_failure_is_bad_gateway() {
    let addr = refused_addr().await;
    let body = json!({ "url": format!("http://{}/", addr) }).to_string();

    let response = app().await.oneshot(post_json(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let envelope = read_json(response).await;
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["kind"], "fetch");
}

#[tokio::test]
async fn test_missing_key_is_server_error() {
    let (gateway_url, _) = spawn_gateway(GatewayScript::market(market_arguments())).await;
    let mut config = llm_config(&gateway_url);
    config.api_key = None;
    let app = router(Arc::new(AppState::new(generator(config))));

    let body = json!({ "url": "https://example.com/story" }).to_string();
    let response = app.oneshot(post_json(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let envelope = read_json(response).await;
    assert_eq!(envelope["error"], "QUICKBET_IT_UNSET_KEY not configured");
    assert_eq!(envelope["kind"], "configuration");
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/generate-market")
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type, apikey")
        .body(Body::empty())
        .unwrap();

    let response = app().await.oneshot(request).await.unwrap();
    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "{name} missing from {allowed}");
    }
}

#[tokio::test]
async fn test_cors_header_on_post() {
    let mut request = post_json("{}");
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://app.example.com".parse().unwrap());

    let response = app().await.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app().await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
