//! Tools API - /api/tools
//!
//! GET  /api/tools/search_location?query=... - Map snippet as HTML (or plain text)
//! POST /api/tools/search_location           - Same search, tagged JSON result

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use pico_core::ToolOutput;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/search_location", get(search_location).post(search_location_json))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    query: String,
}

async fn search_location(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Response {
    match state.tool.search_location(&q.query).await {
        ToolOutput::Html(fragment) => (
            [(header::CONTENT_DISPOSITION, fragment.disposition.as_header())],
            Html(fragment.content),
        )
            .into_response(),
        ToolOutput::Text { text } => text.into_response(),
    }
}

async fn search_location_json(
    State(state): State<AppState>,
    Json(q): Json<SearchQuery>,
) -> Json<ToolOutput> {
    Json(state.tool.search_location(&q.query).await)
}
