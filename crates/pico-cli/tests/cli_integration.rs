//! Integration tests for the pico-cli commands.
//!
//! These exercise the same code paths as the binary, with a mocked n8n
//! webhook and temporary config files for isolation.

use pico_cli::commands::{self, chat::ChatSession, ConfigOverrides};
use pico_core::PicoConfig;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> PicoConfig {
    let mut config = PicoConfig::default();
    config.pipe.n8n_url = format!("{}/webhook/pico-maps", server.uri());
    config.pipe.enable_status_indicator = false;
    config
}

async fn mount_cafe_reply(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "Open daily until 10pm.",
            "result": {
                "name": "Kopi Tomohon",
                "formatted_address": "Jl. Raya Tomohon",
                "place_id": "kt-1",
                "geometry": { "location": { "lat": 1.3234, "lng": 124.8389 } }
            }
        })))
        .mount(server)
        .await;
}

#[test]
fn test_load_config_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pico.yaml");
    std::fs::write(
        &path,
        "pipe:\n  n8n_url: http://from-file/webhook\n  n8n_bearer_token: file-token\n",
    )
    .unwrap();

    let overrides = ConfigOverrides {
        n8n_url: Some("http://from-flag/webhook".to_string()),
        maps_api_key: Some("FLAG_KEY".to_string()),
        no_status: true,
        ..ConfigOverrides::default()
    };
    let config = commands::load_config(path.to_str(), &overrides).unwrap();

    assert_eq!(config.pipe.n8n_url, "http://from-flag/webhook");
    assert_eq!(config.pipe.n8n_bearer_token, "file-token");
    assert_eq!(config.pipe.google_maps_api_key, "FLAG_KEY");
    assert_eq!(config.tool.google_maps_api_key, "FLAG_KEY");
    assert!(!config.pipe.enable_status_indicator);
}

#[test]
fn test_load_config_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");
    let err = commands::load_config(path.to_str(), &ConfigOverrides::default()).unwrap_err();
    assert!(err.contains("Failed to read config file"), "{}", err);
}

#[test]
fn test_config_render_masks_secrets() {
    let mut config = PicoConfig::default();
    config.pipe.n8n_bearer_token = "super-secret".to_string();

    let yaml = commands::config::render(&config).unwrap();
    assert!(!yaml.contains("super-secret"));
    assert!(yaml.contains("n8n_url"));
}

#[tokio::test]
async fn test_ask_returns_markdown() {
    let server = MockServer::start().await;
    mount_cafe_reply(&server).await;

    let output = commands::ask::execute(&config_for(&server), "coffee in Tomohon", Some("c-1"))
        .await
        .unwrap();

    assert!(output.starts_with("### Kopi Tomohon"));
    assert!(output.contains("Open daily until 10pm."));
}

#[tokio::test]
async fn test_ask_surfaces_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let err = commands::ask::execute(&config_for(&server), "coffee", None)
        .await
        .unwrap_err();
    assert!(err.contains("401"));
    assert!(err.contains("bad token"));
}

#[tokio::test]
async fn test_search_without_key_reports_configuration() {
    let mut config = PicoConfig::default();
    config.tool.google_maps_api_key = String::new();

    let output = commands::search::execute(&config, "Kopi Tomohon").await;
    assert!(output.content().starts_with("Configuration error"));
}

#[tokio::test]
async fn test_chat_session_keeps_history_and_chat_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "sessionId": "chat-xyz" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "Here it is.",
            "result": {
                "name": "Kopi Tomohon",
                "formatted_address": "Jl. Raya Tomohon",
                "place_id": "kt-1",
                "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
            }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = ChatSession::new(&config_for(&server), "chat-xyz".to_string());
    session.send("coffee").await.unwrap();
    session.send("and another one").await.unwrap();

    let roles: Vec<&str> = session.messages().iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["user", "assistant", "user", "assistant"]);

    session.clear();
    assert!(session.messages().is_empty());
}
