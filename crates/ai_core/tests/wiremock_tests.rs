//! Integration tests for the Anthropic generation engine using WireMock
//!
//! These tests mock the Messages API to verify client behavior without
//! reaching the real provider.

use ai_core::{
    AnthropicGenerationEngine, ContentBlock, GenerationConfig, GenerationEngine, GenerationError,
    MessageRequest,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn config_for_mock(base_url: &str) -> GenerationConfig {
    GenerationConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2000,
        ..GenerationConfig::with_api_key("sk-test-key")
    }
}

fn engine_for(server: &MockServer) -> AnthropicGenerationEngine {
    AnthropicGenerationEngine::new(config_for_mock(&server.uri())).expect("Failed to create engine")
}

/// Sample Messages API reply with a web search trace
fn short_request() -> MessageRequest {
    MessageRequest::with_system("Be brief", "hi")
}

fn message_success_response() -> serde_json::Value {
    serde_json::json!({
        "id": "msg_01XFDUDYJgAACzvnptvVoYEL",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-sonnet-20241022",
        "content": [
            {
                "type": "server_tool_use",
                "id": "srvtoolu_01",
                "name": "web_search",
                "input": {"query": "family activities Austin Saturday"}
            },
            {
                "type": "web_search_tool_result",
                "tool_use_id": "srvtoolu_01",
                "content": [
                    {"type": "web_search_result", "url": "https://thinkeryaustin.org", "title": "Thinkery"}
                ]
            },
            {
                "type": "text",
                "text": "{\"recommendations\": [{\"title\": \"**Thinkery**\", \"description\": \"Hands-on science.\"}]}"
            }
        ],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 512, "output_tokens": 128}
    })
}

// =============================================================================
// Generation Tests
// =============================================================================

#[tokio::test]
async fn generate_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_success_response()))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let response = engine
        .generate(MessageRequest::with_system("system", "Find activities"))
        .await
        .unwrap();

    assert_eq!(response.model, "claude-3-5-sonnet-20241022");
    assert_eq!(response.content.len(), 3);
    assert!(matches!(response.content[0], ContentBlock::ServerToolUse { .. }));
    assert!(response.text().contains("recommendations"));
    assert_eq!(response.usage.map(|u| u.input_tokens), Some(512));
}

#[tokio::test]
async fn generate_sends_fixed_parameters_and_search_tool() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(serde_json::json!({
            "model": "claude-3-5-sonnet-20241022",
            "max_tokens": 2000,
            "temperature": 0.7,
            "system": "Be helpful",
            "messages": [{"role": "user", "content": "Find activities"}],
            "tools": [{"type": "web_search_20250305", "name": "web_search", "max_uses": 5}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_success_response()))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let result = engine
        .generate(MessageRequest::with_system("Be helpful", "Find activities"))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let result = engine_for(&server)
        .generate(short_request())
        .await;

    assert!(matches!(result, Err(GenerationError::Authentication(_))));
}

#[tokio::test]
async fn rate_limit_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let result = engine_for(&server)
        .generate(short_request())
        .await;

    assert!(matches!(result, Err(GenerationError::RateLimited)));
}

#[tokio::test]
async fn overloaded_maps_to_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let result = engine_for(&server)
        .generate(short_request())
        .await;

    assert!(matches!(result, Err(GenerationError::ServerError(_))));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = engine_for(&server)
        .generate(short_request())
        .await;

    assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(message_success_response())
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = GenerationConfig {
        timeout_ms: 50,
        ..config_for_mock(&server.uri())
    };
    let engine = AnthropicGenerationEngine::new(config).unwrap();
    let result = engine.generate(short_request()).await;

    assert!(matches!(result, Err(GenerationError::Timeout)));
}

#[tokio::test]
async fn connection_refused_is_reported() {
    let config = config_for_mock("http://127.0.0.1:1");
    let engine = AnthropicGenerationEngine::new(config).unwrap();
    let result = engine.generate(short_request()).await;

    assert!(result.is_err());
}
