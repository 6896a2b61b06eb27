//! Workflow Pipe — forwards the latest chat message to an n8n webhook.
//!
//! ```text
//! ConversationBody ──► last message ──► POST n8n_url ──► JSON reply
//!                                                           │
//!        assistant message ◄── Markdown ◄── PlaceResult ◄───┘
//! ```
//!
//! The pipe is single-shot: one webhook call, no retries. Every failure is
//! reported as a terminal error status and returned as `Err`; nothing is
//! raised past [`WorkflowPipe::invoke`].

use std::time::Duration;

use serde_json::Value;

use crate::config::{MapsConfig, PipeConfig};
use crate::error::AdapterError;
use crate::events::{StatusEmitter, StatusLevel, StatusSink};
use crate::maps::MapLinks;
use crate::models::message::ConversationBody;
use crate::models::place::PlaceResult;
use crate::render;

const CALLING_STATUS: &str = "Calling n8n workflow...";
const COMPLETE_STATUS: &str = "Complete";

/// Per-request correlation data supplied by the host alongside the sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
}

impl RequestContext {
    pub fn new(chat_id: Option<String>, message_id: Option<String>) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }

    /// Value sent as `sessionId`; empty when the host gave no chat id.
    pub fn session_id(&self) -> &str {
        self.chat_id.as_deref().unwrap_or("")
    }
}

/// The n8n reply once the place and free text have been pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReply {
    pub response_text: String,
    pub place: PlaceResult,
}

/// Calls the n8n workflow and renders its place reply.
pub struct WorkflowPipe {
    config: PipeConfig,
    maps: MapsConfig,
    client: reqwest::Client,
}

impl WorkflowPipe {
    pub fn new(config: PipeConfig, maps: MapsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "[WorkflowPipe] Failed to build HTTP client ({}), falling back to one without a timeout",
                    e
                );
                reqwest::Client::new()
            });
        Self {
            config,
            maps,
            client,
        }
    }

    /// Run one pipe invocation.
    ///
    /// - empty conversation: a "no messages" notice is appended and returned
    ///   as `Ok`, with a single terminal error status
    /// - success: the Markdown reply is appended and returned
    /// - failure: a terminal error status is emitted and `Err` returned; the
    ///   conversation is left untouched
    pub async fn invoke(
        &self,
        body: &mut ConversationBody,
        sink: Option<&dyn StatusSink>,
        context: &RequestContext,
    ) -> Result<String, AdapterError> {
        let mut status = StatusEmitter::from_config(sink, &self.config);

        let Some(question) = body.last_content().map(|s| s.to_string()) else {
            let notice = AdapterError::NoInput.to_string();
            tracing::warn!("[WorkflowPipe] {}", notice);
            status.emit(StatusLevel::Error, &notice, true).await;
            body.push_assistant(notice.clone());
            return Ok(notice);
        };

        status.emit(StatusLevel::Info, CALLING_STATUS, false).await;

        match self.call_workflow(&question, context).await {
            Ok(reply) => {
                let links = MapLinks::for_place(
                    &self.maps,
                    &self.config.google_maps_api_key,
                    &reply.place,
                );
                let output = render::place_markdown(&reply.place, &links, &reply.response_text);
                body.push_assistant(output.clone());
                status.emit(StatusLevel::Info, COMPLETE_STATUS, true).await;
                Ok(output)
            }
            Err(e) => {
                tracing::error!("[WorkflowPipe] Workflow call failed: {}", e);
                status
                    .emit(
                        StatusLevel::Error,
                        &format!("Error during sequence execution: {}", e),
                        true,
                    )
                    .await;
                Err(e)
            }
        }
    }

    /// POST the question to the webhook and parse the reply.
    pub async fn call_workflow(
        &self,
        question: &str,
        context: &RequestContext,
    ) -> Result<WorkflowReply, AdapterError> {
        let mut payload = serde_json::Map::new();
        payload.insert(
            "sessionId".to_string(),
            Value::String(context.session_id().to_string()),
        );
        payload.insert(
            self.config.input_field.clone(),
            Value::String(question.to_string()),
        );

        tracing::info!(
            "[WorkflowPipe] Calling n8n workflow: {} (session: '{}')",
            self.config.n8n_url,
            context.session_id()
        );

        let response = self
            .client
            .post(&self.config.n8n_url)
            .bearer_auth(&self.config.n8n_bearer_token)
            .header("content-type", "application/json")
            .json(&Value::Object(payload))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(AdapterError::Network(format!(
                "n8n returned {} - {}",
                status.as_u16(),
                response_text
            )));
        }

        let json: Value = serde_json::from_str(&response_text)?;
        self.parse_reply(&json)
    }

    /// Read the configured response fields out of the workflow JSON.
    pub fn parse_reply(&self, json: &Value) -> Result<WorkflowReply, AdapterError> {
        let response_text = match json.get(&self.config.response_field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => {
                return Err(AdapterError::MalformedResponse(format!(
                    "missing or invalid key '{}'",
                    self.config.response_field
                )))
            }
            Some(other) => other.to_string(),
        };

        let result = json.get(&self.config.response_result_field).ok_or_else(|| {
            AdapterError::MalformedResponse(format!(
                "missing or invalid key '{}'",
                self.config.response_result_field
            ))
        })?;

        Ok(WorkflowReply {
            response_text,
            place: PlaceResult::from_json(result)?,
        })
    }
}
