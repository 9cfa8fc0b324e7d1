//! End-to-end pipeline tests against local page and gateway servers

use crate::common::*;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Router;
use quickbet::draft::GenerationError;
use quickbet::llm::LlmError;
use quickbet::metadata::FetchError;
use quickbet::pipeline::PipelineError;
use serde_json::json;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_og_image_used_without_generation() {
    let (page_url, _) = spawn_page(OG_PAGE).await;
    let (gateway_url, recorded) = spawn_gateway(GatewayScript::market(market_arguments())).await;

    let draft = generator(llm_config(&gateway_url))
        .generate(&page_url)
        .await
        .unwrap();

    assert_eq!(draft.hero_image.as_deref(), Some("https://example.com/x.png"));
    assert_eq!(draft.source_url, page_url);
    assert_eq!(draft.question, "Will X happen before next Friday?");
    assert_eq!(draft.display_title, "X watch");
    assert_eq!(draft.confidence, 78.0);
    assert!(recorded.images().is_empty());

    let completions = recorded.completions();
    assert_eq!(completions.len(), 1);
    let request = &completions[0];
    assert_eq!(request["model"], "google/gemini-2.5-flash");
    assert_eq!(
        request["tool_choice"]["function"]["name"],
        "create_prediction_market"
    );
    let user = request["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("Title: Will X happen?"));
    assert!(user.contains("Description: Context about X"));
}

#[tokio::test]
async fn test_icon_generated_alongside_og_image() {
    let (page_url, _) = spawn_page(OG_PAGE).await;
    let (gateway_url, recorded) = spawn_gateway(
        GatewayScript::market(market_arguments()).with_image("data:image/png;base64,SUNPTg=="),
    )
    .await;

    let mut config = llm_config(&gateway_url);
    config.generate_icon = true;
    let draft = generator(config).generate(&page_url).await.unwrap();

    assert_eq!(draft.hero_image.as_deref(), Some("https://example.com/x.png"));
    assert_eq!(
        draft.icon_image.as_deref(),
        Some("data:image/png;base64,SUNPTg==")
    );

    let images = recorded.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["model"], "google/gemini-2.5-flash-image-preview");
    assert_eq!(images[0]["modalities"], json!(["image", "text"]));
}

#[tokio::test]
async fn test_generated_hero_when_page_has_no_image() {
    let (page_url, _) = spawn_page(BARE_PAGE).await;
    let (gateway_url, recorded) = spawn_gateway(
        GatewayScript::market(market_arguments()).with_image("https://cdn.example.com/gen.png"),
    )
    .await;

    let draft = generator(llm_config(&gateway_url))
        .generate(&page_url)
        .await
        .unwrap();

    assert_eq!(
        draft.hero_image.as_deref(),
        Some("https://cdn.example.com/gen.png")
    );
    let images = recorded.images();
    assert_eq!(images.len(), 1);
    let prompt = images[0]["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("Will X happen before next Friday?"));
    assert!(prompt.contains("16:9"));
}

#[tokio::test]
async fn test_image_generation_failure_is_not_fatal() {
    let (page_url, _) = spawn_page(BARE_PAGE).await;
    let (gateway_url, recorded) = spawn_gateway(GatewayScript::market(market_arguments())).await;

    let mut config = llm_config(&gateway_url);
    config.generate_icon = true;
    let draft = generator(config).generate(&page_url).await.unwrap();

    assert!(draft.hero_image.is_none());
    assert!(draft.icon_image.is_none());
    assert_eq!(recorded.images().len(), 2);
}

#[tokio::test]
async fn test_unreachable_page_never_calls_model() {
    let addr = refused_addr().await;
    let (gateway_url, recorded) = spawn_gateway(GatewayScript::market(market_arguments())).await;

    let err = generator(llm_config(&gateway_url))
        .generate(&format!("http://{}/story", addr))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Fetch(FetchError::Network { .. })));
    assert_eq!(err.kind(), "fetch");
    assert!(recorded.all().is_empty());
}

#[tokio::test]
async fn test_non_success_page_is_fetch_error() {
    let app = Router::new().route(
        "/",
        get(|| async { (axum::http::StatusCode::NOT_FOUND, "gone") }),
    );
    let addr = spawn(app).await;
    let (gateway_url, recorded) = spawn_gateway(GatewayScript::market(market_arguments())).await;

    let err = generator(llm_config(&gateway_url))
        .generate(&format!("http://{}/", addr))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Fetch(FetchError::Status { status: 404, .. })
    ));
    assert!(recorded.all().is_empty());
}

#[tokio::test]
async fn test_prose_answer_is_generation_error() {
    let (page_url, _) = spawn_page(OG_PAGE).await;
    let (gateway_url, recorded) = spawn_gateway(GatewayScript::default()).await;

    let err = generator(llm_config(&gateway_url))
        .generate(&page_url)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Generation(GenerationError::Completion(LlmError::MissingToolCall(_)))
    ));
    assert_eq!(err.to_string(), "No create_prediction_market tool call in AI response");
    assert!(recorded.images().is_empty());
}

#[tokio::test]
async fn test_gateway_rejection_is_generation_error() {
    let (page_url, _) = spawn_page(OG_PAGE).await;
    let (gateway_url, _) = spawn_gateway(GatewayScript::market(market_arguments())).await;

    let mut config = llm_config(&gateway_url);
    config.api_key = Some("wrong-key".to_string());
    let err = generator(config).generate(&page_url).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Generation(GenerationError::Completion(LlmError::Api { status: 401, .. }))
    ));
    assert_eq!(err.to_string(), "AI gateway error: 401");
}

#[tokio::test]
async fn test_missing_api_key_fails_before_fetch() {
    let (page_url, hits) = spawn_page(OG_PAGE).await;
    let (gateway_url, recorded) = spawn_gateway(GatewayScript::market(market_arguments())).await;

    let mut config = llm_config(&gateway_url);
    config.api_key = None;
    let err = generator(config).generate(&page_url).await.unwrap_err();

    assert!(matches!(err, PipelineError::Configuration(_)));
    assert_eq!(err.to_string(), "QUICKBET_IT_UNSET_KEY not configured");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(recorded.all().is_empty());
}

#[tokio::test]
async fn test_out_of_range_confidence_clamped() {
    let (page_url, _) = spawn_page(OG_PAGE).await;
    let mut arguments = market_arguments();
    arguments["confidence"] = json!(140);
    let (gateway_url, _) = spawn_gateway(GatewayScript::market(arguments)).await;

    let draft = generator(llm_config(&gateway_url))
        .generate(&page_url)
        .await
        .unwrap();
    assert_eq!(draft.confidence, 100.0);
}

#[tokio::test]
async fn test_source_url_is_input_not_redirect_target() {
    let app = Router::new()
        .route("/short", get(|| async { Redirect::temporary("/article") }))
        .route("/article", get(|| async { Html(OG_PAGE) }));
    let addr = spawn(app).await;
    let (gateway_url, _) = spawn_gateway(GatewayScript::market(market_arguments())).await;

    let input = format!("http://{}/short", addr);
    let draft = generator(llm_config(&gateway_url))
        .generate(&input)
        .await
        .unwrap();

    assert_eq!(draft.source_url, input);
    assert_eq!(draft.hero_image.as_deref(), Some("https://example.com/x.png"));
}

#[tokio::test]
async fn test_slow_gateway_is_generation_timeout() {
    let (page_url, _) = spawn_page(OG_PAGE).await;
    let (gateway_url, recorded) = spawn_gateway(
        GatewayScript::market(market_arguments()).with_delay(std::time::Duration::from_secs(4)),
    )
    .await;

    let mut config = llm_config(&gateway_url);
    config.timeout_secs = quick_timeout().as_secs();
    let err = generator(config).generate(&page_url).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Generation(GenerationError::Completion(LlmError::Timeout { secs: 1 }))
    ));
    assert_eq!(err.kind(), "generation");
    assert_eq!(recorded.completions().len(), 1);
    assert!(recorded.images().is_empty());
}
