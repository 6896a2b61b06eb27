//! Pipe API - /api/pipe
//!
//! POST /api/pipe - Run the n8n workflow pipe over a host conversation
//!
//! The status events delivered during the call are returned alongside the
//! result, in the host's `{"type": "status", "data": {...}}` shape.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use pico_core::events::HostEvent;
use pico_core::{CollectingSink, ConversationBody, Message, RequestContext, StatusEvent};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(invoke_pipe))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PipeRequest {
    #[serde(default)]
    messages: Vec<Message>,
    chat_id: Option<String>,
    message_id: Option<String>,
}

async fn invoke_pipe(State(state): State<AppState>, Json(req): Json<PipeRequest>) -> Response {
    let mut body = ConversationBody::new(req.messages);
    let context = RequestContext::new(req.chat_id, req.message_id);
    let sink = CollectingSink::new();

    let result = state.pipe.invoke(&mut body, Some(&sink), &context).await;

    let events: Vec<HostEvent> = sink.events().await.iter().map(StatusEvent::to_host).collect();

    match result {
        Ok(output) => Json(serde_json::json!({
            "output": output,
            "messages": body.messages,
            "events": events,
        }))
        .into_response(),
        Err(e) => (
            e.status_code(),
            Json(serde_json::json!({
                "error": e.to_string(),
                "events": events,
            })),
        )
            .into_response(),
    }
}
