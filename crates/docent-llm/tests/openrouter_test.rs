//! Tests for the OpenRouter provider against a local fake endpoint.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use docent_core::{DocentError, ErrorCode, GenerationOptions, Llm, LlmConfig, Message};
use docent_llm::OpenRouterLlm;
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Captured {
    headers: Arc<Mutex<Option<HeaderMap>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

fn config(base_url: String) -> LlmConfig {
    LlmConfig {
        api_key: Some("sk-or-test".to_string()),
        base_url: Some(base_url),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_generate_sends_chat_completion() {
    let captured = Captured::default();
    let app = Router::new()
        .route(
            "/api/v1/chat/completions",
            post(
                |State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    *captured.headers.lock().unwrap() = Some(headers);
                    *captured.body.lock().unwrap() = Some(body);
                    Json(json!({
                        "choices": [{"message": {"role": "assistant", "content": "The total is 42."}}],
                        "usage": {"prompt_tokens": 120, "completion_tokens": 6, "total_tokens": 126}
                    }))
                },
            ),
        )
        .with_state(captured.clone());
    let base = serve(app).await;

    let llm = OpenRouterLlm::new(config(base)).unwrap();
    let messages = vec![
        Message::system("You answer questions about documents."),
        Message::user("Question: What is the total?"),
    ];
    let response = llm
        .generate(
            &messages,
            Some(GenerationOptions {
                temperature: Some(0.1),
                max_tokens: Some(500),
            }),
        )
        .await
        .unwrap();

    assert_eq!(response.content.as_deref(), Some("The total is 42."));
    assert_eq!(response.usage.unwrap().total_tokens, 126);

    let headers = captured.headers.lock().unwrap().clone().unwrap();
    assert_eq!(headers["authorization"], "Bearer sk-or-test");
    assert_eq!(headers["http-referer"], "https://localhost:3000");
    assert_eq!(headers["x-title"], "PDF Q&A Application");

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "deepseek/deepseek-r1-0528:free");
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "Question: What is the total?");
    assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"error": {"message": "Rate limit exceeded", "code": 429}})),
            )
        }),
    );
    let base = serve(app).await;

    let llm = OpenRouterLlm::new(config(base)).unwrap();
    let err = llm
        .generate(&[Message::user("hi")], None)
        .await
        .unwrap_err();

    assert!(matches!(err, DocentError::Llm { .. }));
    let text = err.to_string();
    assert!(text.contains("429"));
    assert!(text.contains("Rate limit exceeded"));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { "this is not json" }),
    );
    let base = serve(app).await;

    let llm = OpenRouterLlm::new(config(base)).unwrap();
    let err = llm
        .generate(&[Message::user("hi")], None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::LlmInvalidResponse);
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = serve(app).await;

    let llm = OpenRouterLlm::new(config(base)).unwrap();
    let err = llm
        .generate(&[Message::user("hi")], None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::LlmInvalidResponse);
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"choices": []}))
        }),
    );
    let base = serve(app).await;

    let llm = OpenRouterLlm::new(LlmConfig {
        timeout_secs: 1,
        ..config(base)
    })
    .unwrap();
    let err = llm
        .generate(&[Message::user("hi")], None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::LlmTimeout);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connection_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let llm = OpenRouterLlm::new(config(format!("http://{}/api/v1", addr))).unwrap();
    let err = llm
        .generate(&[Message::user("hi")], None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::LlmConnectionFailed);
}
