//! REST surface tests with a scripted model behind the orchestrator

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use parley_core::ServiceConfig;
use parley_llm::{ChatClient, ChatReply, ChatRequest, LlmError, TokenUsage, ToolCallRequest};
use parley_server::{app, AppState};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct ScriptedClient {
    replies: Mutex<VecDeque<parley_llm::Result<ChatReply>>>,
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, _request: ChatRequest) -> parley_llm::Result<ChatReply> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::api("script exhausted")))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

fn test_app(replies: Vec<parley_llm::Result<ChatReply>>) -> Router {
    let client = Arc::new(ScriptedClient {
        replies: Mutex::new(replies.into()),
    });

    let mut config = ServiceConfig::default();
    config.llm.model = "test-model".to_string();

    app(AppState::with_client(client, &config).unwrap())
}

fn text_reply(content: &str) -> parley_llm::Result<ChatReply> {
    Ok(ChatReply {
        content: Some(content.to_string()),
        tool_calls: Vec::new(),
        usage: TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
        },
        finish_reason: Some("stop".to_string()),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_model() {
    let app = test_app(vec![]);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "test-model");
}

#[tokio::test]
async fn root_lists_endpoints() {
    let app = test_app(vec![]);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["endpoints"]["ask"], "/api/v1/ask");
}

#[tokio::test]
async fn ask_returns_answer_and_session() {
    let app = test_app(vec![text_reply("Paris.")]);

    let response = app
        .oneshot(post_json(
            "/api/v1/ask",
            json!({"question": "Capital of France?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "Paris.");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["usage"]["total_tokens"], 30);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert_eq!(body["tool_calls"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn ask_with_tool_round_reports_record() {
    let tool_round = Ok(ChatReply {
        content: None,
        tool_calls: vec![ToolCallRequest::new(
            "call_1",
            "calculate",
            json!({"operation": "add", "a": 2.0, "b": 2.0}),
        )],
        usage: TokenUsage::default(),
        finish_reason: Some("tool_calls".to_string()),
    });
    let app = test_app(vec![tool_round, text_reply("2 + 2 = 4")]);

    let response = app
        .oneshot(post_json("/api/v1/ask", json!({"question": "2+2?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "2 + 2 = 4");

    let records = body["tool_calls"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["tool_name"], "calculate");
    assert_eq!(records[0]["result"]["result"], 4.0);
}

#[tokio::test]
async fn ask_rejects_empty_question() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(post_json("/api/v1/ask", json!({"question": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ask_rejects_out_of_range_temperature() {
    let app = test_app(vec![text_reply("unused")]);

    let response = app
        .oneshot(post_json(
            "/api/v1/ask",
            json!({"question": "Hi", "temperature": 3.5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ask_maps_model_failure_to_bad_gateway() {
    let app = test_app(vec![Err(LlmError::Timeout)]);

    let response = app
        .oneshot(post_json("/api/v1/ask", json!({"question": "Hello?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn history_of_unknown_session_is_not_found() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(get("/api/v1/sessions/absent/history"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_reflects_the_exchange() {
    let app = test_app(vec![text_reply("Hi there!")]);

    app.clone()
        .oneshot(post_json(
            "/api/v1/ask",
            json!({"question": "Hello", "session_id": "s-history"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/api/v1/sessions/s-history/history"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["session_id"], "s-history");

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "Hello");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "Hi there!");
}

#[tokio::test]
async fn session_lifecycle_list_and_delete() {
    let app = test_app(vec![text_reply("one"), text_reply("two")]);

    for id in ["s-a", "s-b"] {
        app.clone()
            .oneshot(post_json(
                "/api/v1/ask",
                json!({"question": "Hi", "session_id": id}),
            ))
            .await
            .unwrap();
    }

    let response = app.clone().oneshot(get("/api/v1/sessions")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body, json!(["s-a", "s-b"]));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/sessions/s-a")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Second delete of the same session is a miss
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/sessions/s-a")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/v1/sessions")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body, json!(["s-b"]));
}

#[tokio::test]
async fn tools_endpoint_lists_builtins() {
    let app = test_app(vec![]);

    let response = app.oneshot(get("/api/v1/tools")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], 3);

    let names: Vec<_> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["check_transaction_status", "get_weather", "calculate"]
    );

    let first = &body["tools"][0];
    assert!(first["description"].as_str().unwrap().contains("transaction"));
    assert_eq!(first["schema"]["type"], "function");
}
