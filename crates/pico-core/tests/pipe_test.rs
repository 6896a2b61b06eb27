//! Integration tests for the workflow pipe against a mocked n8n webhook.

use pico_core::events::StatusPhase;
use pico_core::{
    AdapterError, CollectingSink, ConversationBody, MapsConfig, Message, MessageRole, PipeConfig,
    RequestContext, StatusLevel, WorkflowPipe,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipe_for(server: &MockServer) -> WorkflowPipe {
    let config = PipeConfig {
        n8n_url: format!("{}/webhook/pico-maps", server.uri()),
        n8n_bearer_token: "test-token".to_string(),
        google_maps_api_key: "MAPS_KEY".to_string(),
        ..PipeConfig::default()
    };
    WorkflowPipe::new(config, MapsConfig::default())
}

fn cafe_reply() -> serde_json::Value {
    json!({
        "output": "hi",
        "result": {
            "name": "Cafe X",
            "formatted_address": "123 St",
            "place_id": "abc",
            "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
        }
    })
}

#[tokio::test]
async fn test_success_renders_and_appends_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/pico-maps"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "sessionId": "chat-1",
            "chatInput": "coffee near me"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cafe_reply()))
        .expect(1)
        .mount(&server)
        .await;

    let pipe = pipe_for(&server);
    let sink = CollectingSink::new();
    let mut body = ConversationBody::new(vec![Message::user("coffee near me")]);
    let ctx = RequestContext::new(Some("chat-1".to_string()), None);

    let output = pipe.invoke(&mut body, Some(&sink), &ctx).await.unwrap();

    assert!(output.contains("Cafe X"));
    assert!(output.contains("123 St"));
    assert!(output.contains("<iframe"));
    assert!(output.contains("key=MAPS_KEY&q=place_id:abc"));
    assert!(output.contains("query=1.0,2.0"));
    assert!(output.contains("hi"));

    assert_eq!(body.messages.len(), 2);
    let last = body.messages.last().unwrap();
    assert_eq!(last.role, MessageRole::Assistant);
    assert_eq!(last.content, output);

    let events = sink.events().await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].level, StatusLevel::Info);
    assert!(!events[0].done);
    assert_eq!(events[1].message, "Complete");
    assert!(events[1].done);
}

#[tokio::test]
async fn test_missing_chat_id_sends_empty_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({ "sessionId": "", "chatInput": "where?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cafe_reply()))
        .expect(1)
        .mount(&server)
        .await;

    let mut body = ConversationBody::new(vec![Message::user("where?")]);
    pipe_for(&server)
        .invoke(&mut body, None, &RequestContext::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_failure_reports_code_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("workflow exploded"))
        .mount(&server)
        .await;

    let sink = CollectingSink::new();
    let mut body = ConversationBody::new(vec![Message::user("coffee")]);

    let err = pipe_for(&server)
        .invoke(&mut body, Some(&sink), &RequestContext::default())
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(matches!(err, AdapterError::Network(_)));
    assert!(msg.contains("500"), "{}", msg);
    assert!(msg.contains("workflow exploded"), "{}", msg);

    // No assistant message on the failure path.
    assert_eq!(body.messages.len(), 1);

    let events = sink.events().await;
    let last = events.last().unwrap();
    assert_eq!(last.level, StatusLevel::Error);
    assert!(last.done);
    assert!(last.message.contains("workflow exploded"));
}

#[tokio::test]
async fn test_non_200_success_status_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(cafe_reply()))
        .mount(&server)
        .await;

    let sink = CollectingSink::new();
    let mut body = ConversationBody::new(vec![Message::user("coffee")]);

    let err = pipe_for(&server)
        .invoke(&mut body, Some(&sink), &RequestContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AdapterError::Network(_)));
    assert!(err.to_string().contains("201"), "{}", err);
    assert_eq!(body.messages.len(), 1);

    let last = sink.events().await.pop().unwrap();
    assert_eq!(last.level, StatusLevel::Error);
    assert!(last.done);
}

#[tokio::test]
async fn test_malformed_reply_is_reported_like_http_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "hi" })))
        .mount(&server)
        .await;

    let sink = CollectingSink::new();
    let mut body = ConversationBody::new(vec![Message::user("coffee")]);

    let err = pipe_for(&server)
        .invoke(&mut body, Some(&sink), &RequestContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AdapterError::MalformedResponse(_)));
    assert_eq!(body.messages.len(), 1);
    let last = sink.events().await.pop().unwrap();
    assert_eq!(last.level, StatusLevel::Error);
    assert!(last.done);
}

#[tokio::test]
async fn test_empty_conversation_returns_notice_without_calling() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cafe_reply()))
        .expect(0)
        .mount(&server)
        .await;

    let sink = CollectingSink::new();
    let mut body = ConversationBody::default();

    let output = pipe_for(&server)
        .invoke(&mut body, Some(&sink), &RequestContext::default())
        .await
        .unwrap();

    assert_eq!(output, "No messages found in the request body");
    assert_eq!(body.messages.len(), 1);
    assert_eq!(body.messages[0].role, MessageRole::Assistant);
    assert_eq!(body.messages[0].content, output);

    let events = sink.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, StatusLevel::Error);
    assert!(events[0].done);
    match events[0].to_host() {
        pico_core::events::HostEvent::Status(payload) => {
            assert_eq!(payload.status, StatusPhase::Complete)
        }
    }
}

#[tokio::test]
async fn test_disabled_status_indicator_emits_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cafe_reply()))
        .mount(&server)
        .await;

    let config = PipeConfig {
        n8n_url: server.uri(),
        enable_status_indicator: false,
        ..PipeConfig::default()
    };
    let pipe = WorkflowPipe::new(config, MapsConfig::default());
    let sink = CollectingSink::new();
    let mut body = ConversationBody::new(vec![Message::user("coffee")]);

    pipe.invoke(&mut body, Some(&sink), &RequestContext::default())
        .await
        .unwrap();
    assert!(sink.events().await.is_empty());
}
