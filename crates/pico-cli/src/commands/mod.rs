//! CLI command implementations.
//!
//! Each submodule corresponds to a top-level CLI command and drives the
//! pico-core adapters built from the effective [`PicoConfig`].

pub mod ask;
pub mod chat;
pub mod config;
pub mod search;
pub mod server;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pico_core::{PicoConfig, StatusEvent, StatusLevel, StatusSink};

const CONFIG_FILE_NAME: &str = "pico.yaml";

/// Settings given on the command line (or their env fallbacks). Each one,
/// when present, wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub n8n_url: Option<String>,
    pub n8n_bearer_token: Option<String>,
    pub maps_api_key: Option<String>,
    pub no_status: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut PicoConfig) {
        if let Some(url) = &self.n8n_url {
            config.pipe.n8n_url = url.clone();
        }
        if let Some(token) = &self.n8n_bearer_token {
            config.pipe.n8n_bearer_token = token.clone();
        }
        if let Some(key) = &self.maps_api_key {
            config.pipe.google_maps_api_key = key.clone();
            config.tool.google_maps_api_key = key.clone();
        }
        if self.no_status {
            config.pipe.enable_status_indicator = false;
        }
    }
}

/// Find the config file to use when none was given explicitly:
/// `./pico.yaml`, then `<config dir>/pico/pico.yaml`.
pub fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("pico").join(CONFIG_FILE_NAME))
        .filter(|p| p.is_file())
}

/// Build the effective configuration: file (explicit or discovered, else
/// defaults) with command-line overrides on top.
pub fn load_config(
    explicit_path: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<PicoConfig, String> {
    let path = explicit_path
        .map(PathBuf::from)
        .or_else(discover_config_file);

    let mut config = match path {
        Some(p) => load_file(&p)?,
        None => PicoConfig::default(),
    };
    overrides.apply(&mut config);
    Ok(config)
}

fn load_file(path: &Path) -> Result<PicoConfig, String> {
    tracing::debug!("Loading config from {}", path.display());
    PicoConfig::from_file(&path.to_string_lossy()).map_err(|e| e.to_string())
}

/// Status sink that prints progress to stderr, keeping stdout for output.
pub struct ConsoleSink;

#[async_trait]
impl StatusSink for ConsoleSink {
    async fn emit(&self, event: StatusEvent) {
        let marker = match (event.level, event.done) {
            (StatusLevel::Error, _) => "❌",
            (StatusLevel::Info, true) => "✅",
            (StatusLevel::Info, false) => "⏳",
        };
        tracing::debug!("[ConsoleSink] {:?}", event);
        eprintln!("{} {}", marker, event.message);
    }
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}
