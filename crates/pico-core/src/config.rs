//! Adapter configuration, loadable from a YAML file.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```yaml
//! pipe:
//!   n8n_url: "http://localhost:5678/webhook/pico-maps"
//!   n8n_bearer_token: "${N8N_TOKEN}"
//!   emit_interval: 2.0
//!
//! tool:
//!   google_maps_api_key: "${GOOGLE_MAPS_API_KEY}"
//!
//! maps:
//!   base_url: "https://www.google.com/maps"
//! ```
//!
//! String values support `${ENV_VAR}` and `${ENV_VAR:-default}` references,
//! resolved once at load time.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// Env var consulted for the Maps API key when none is configured.
pub const MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

const REDACTED: &str = "****";

/// Top-level config file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PicoConfig {
    #[serde(default)]
    pub pipe: PipeConfig,

    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub maps: MapsConfig,
}

/// Settings for the n8n workflow pipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeConfig {
    /// Webhook that triggers the n8n workflow
    #[serde(default = "default_n8n_url")]
    pub n8n_url: String,

    /// Sent as `Authorization: Bearer <token>`
    #[serde(default = "default_bearer_token")]
    pub n8n_bearer_token: String,

    /// Request body key carrying the user's question
    #[serde(default = "default_input_field")]
    pub input_field: String,

    /// Response key carrying the workflow's free-text answer
    #[serde(default = "default_response_field")]
    pub response_field: String,

    /// Response key carrying the place record
    #[serde(default = "default_response_result_field")]
    pub response_result_field: String,

    /// Key used for the embedded map iframe
    #[serde(default)]
    pub google_maps_api_key: String,

    /// Minimum seconds between non-terminal status events
    #[serde(default = "default_emit_interval")]
    pub emit_interval: f64,

    /// Master switch for status events
    #[serde(default = "default_true")]
    pub enable_status_indicator: bool,

    /// Bound on the whole webhook call, in seconds
    #[serde(default = "default_pipe_timeout")]
    pub timeout_secs: u64,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            n8n_url: default_n8n_url(),
            n8n_bearer_token: default_bearer_token(),
            input_field: default_input_field(),
            response_field: default_response_field(),
            response_result_field: default_response_result_field(),
            google_maps_api_key: String::new(),
            emit_interval: default_emit_interval(),
            enable_status_indicator: true,
            timeout_secs: default_pipe_timeout(),
        }
    }
}

/// Settings for the place-search tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Needs both the Places API and the Maps Embed API enabled
    #[serde(default = "default_tool_api_key")]
    pub google_maps_api_key: String,

    /// Places text-search endpoint
    #[serde(default = "default_places_search_url")]
    pub places_search_url: String,

    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            google_maps_api_key: default_tool_api_key(),
            places_search_url: default_places_search_url(),
            timeout_secs: default_tool_timeout(),
        }
    }
}

/// Where the navigation and embed links point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    #[serde(default = "default_maps_base_url")]
    pub base_url: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            base_url: default_maps_base_url(),
        }
    }
}

fn default_n8n_url() -> String {
    "http://192.168.199.153:5678/webhook/pico-maps".to_string()
}

fn default_bearer_token() -> String {
    "...".to_string()
}

fn default_input_field() -> String {
    "chatInput".to_string()
}

fn default_response_field() -> String {
    "output".to_string()
}

fn default_response_result_field() -> String {
    "result".to_string()
}

fn default_emit_interval() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_pipe_timeout() -> u64 {
    120
}

fn default_tool_api_key() -> String {
    std::env::var(MAPS_API_KEY_ENV).unwrap_or_default()
}

fn default_places_search_url() -> String {
    "https://maps.googleapis.com/maps/api/place/textsearch/json".to_string()
}

fn default_tool_timeout() -> u64 {
    10
}

fn default_maps_base_url() -> String {
    "https://www.google.com/maps".to_string()
}

impl PicoConfig {
    /// Parse a config from a YAML string and resolve `${...}` references.
    pub fn from_yaml(yaml: &str) -> Result<Self, AdapterError> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| AdapterError::Config(format!("Failed to parse config YAML: {}", e)))?;
        config.resolve_env();
        Ok(config)
    }

    /// Load a config from a file path.
    pub fn from_file(path: &str) -> Result<Self, AdapterError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AdapterError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    /// Copy with every secret replaced, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        redact(&mut copy.pipe.n8n_bearer_token);
        redact(&mut copy.pipe.google_maps_api_key);
        redact(&mut copy.tool.google_maps_api_key);
        copy
    }

    fn resolve_env(&mut self) {
        let pipe = &mut self.pipe;
        for value in [
            &mut pipe.n8n_url,
            &mut pipe.input_field,
            &mut pipe.response_field,
            &mut pipe.response_result_field,
            &mut self.tool.places_search_url,
            &mut self.maps.base_url,
        ] {
            *value = resolve_env_vars(value);
        }
        // An unset secret must read as missing, not as its `${...}` text.
        for secret in [
            &mut pipe.n8n_bearer_token,
            &mut pipe.google_maps_api_key,
            &mut self.tool.google_maps_api_key,
        ] {
            *secret = resolve_secret_env_vars(secret);
        }
    }
}

fn redact(value: &mut String) {
    if !value.is_empty() {
        *value = REDACTED.to_string();
    }
}

static ENV_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env reference pattern is valid"));

/// Resolve environment variable references in a string.
/// Supports `${ENV_VAR}` and `${ENV_VAR:-default}` syntax; unknown
/// variables without a default are left untouched.
pub fn resolve_env_vars(input: &str) -> String {
    substitute_env(input, |var| format!("${{{}}}", var))
}

/// Like [`resolve_env_vars`], but unknown variables without a default
/// resolve to an empty string.
pub fn resolve_secret_env_vars(input: &str) -> String {
    substitute_env(input, |_| String::new())
}

fn substitute_env(input: &str, unset: impl Fn(&str) -> String) -> String {
    ENV_REF
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let var_expr = &caps[1];
            if let Some((var_name, default_val)) = var_expr.split_once(":-") {
                std::env::var(var_name).unwrap_or_else(|_| default_val.to_string())
            } else {
                std::env::var(var_expr).unwrap_or_else(|_| unset(var_expr))
            }
        })
        .to_string()
}
