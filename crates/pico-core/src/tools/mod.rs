//! Location Tool — direct place text search against the Places API.
//!
//! `search_location` never fails: every outcome, including configuration and
//! network problems, comes back as a [`ToolOutput`] the host can show as-is.
//!
//!   - place found      → inline HTML fragment with an embedded map
//!   - nothing matched  → "could not be found" text (a normal answer)
//!   - missing API key  → configuration error text, no request made
//!   - transport/HTTP   → network error text
//!   - anything else    → generic error text

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{MapsConfig, ToolConfig};
use crate::error::AdapterError;
use crate::maps::MapLinks;
use crate::models::place::PlaceResult;
use crate::render;

/// Which search result is shown. There is no ranking or disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSelection {
    First,
}

pub const RESULT_SELECTION: ResultSelection = ResultSelection::First;

impl ResultSelection {
    pub fn pick<'a>(&self, results: &'a [Value]) -> Option<&'a Value> {
        match self {
            ResultSelection::First => results.first(),
        }
    }
}

/// How the host should present an HTML payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Inline,
}

impl Disposition {
    /// Value for the `Content-Disposition` header.
    pub fn as_header(&self) -> &'static str {
        match self {
            Disposition::Inline => "inline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlFragment {
    pub content: String,
    pub disposition: Disposition,
}

/// Result of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ToolOutput {
    Html(HtmlFragment),
    Text { text: String },
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        ToolOutput::Text { text: text.into() }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, ToolOutput::Html(_))
    }

    /// The displayable body, whichever the variant.
    pub fn content(&self) -> &str {
        match self {
            ToolOutput::Html(fragment) => &fragment.content,
            ToolOutput::Text { text } => text,
        }
    }

    fn from_error(e: &AdapterError) -> Self {
        match e {
            AdapterError::Configuration(_) => ToolOutput::text(e.to_string()),
            AdapterError::Network(msg) => {
                ToolOutput::text(format!("Failed to reach the Google Maps server: {}", msg))
            }
            other => ToolOutput::text(format!("An unexpected error occurred: {}", other)),
        }
    }
}

/// Searches the Places API and renders the first hit.
pub struct LocationTool {
    config: ToolConfig,
    maps: MapsConfig,
    client: reqwest::Client,
}

impl LocationTool {
    pub fn new(config: ToolConfig, maps: MapsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "[LocationTool] Failed to build HTTP client ({}), falling back to one without a timeout",
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

    /// Search for a place and return a map snippet or an explanatory text.
    pub async fn search_location(&self, query: &str) -> ToolOutput {
        match self.try_search(query).await {
            Ok(Some(place)) => {
                let links =
                    MapLinks::for_place(&self.maps, &self.config.google_maps_api_key, &place);
                ToolOutput::Html(HtmlFragment {
                    content: render::place_html(&place, &links),
                    disposition: Disposition::Inline,
                })
            }
            Ok(None) => ToolOutput::text(format!("Location '{}' could not be found.", query)),
            Err(e) => {
                tracing::warn!("[LocationTool] Search for '{}' failed: {}", query, e);
                ToolOutput::from_error(&e)
            }
        }
    }

    /// Run the search; `Ok(None)` means the provider returned no results.
    pub async fn try_search(&self, query: &str) -> Result<Option<PlaceResult>, AdapterError> {
        let api_key = &self.config.google_maps_api_key;
        if api_key.is_empty() {
            return Err(AdapterError::Configuration(
                "Google Maps API key is not set".to_string(),
            ));
        }

        let url = format!(
            "{}?query={}&key={}",
            self.config.places_search_url,
            urlencoding::encode(query),
            urlencoding::encode(api_key),
        );

        tracing::info!("[LocationTool] Searching places for '{}'", query);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)?;

        let results = data
            .get("results")
            .and_then(|r| r.as_array())
            .map(|r| r.as_slice())
            .unwrap_or_default();

        RESULT_SELECTION
            .pick(results)
            .map(PlaceResult::from_json)
            .transpose()
    }
}
