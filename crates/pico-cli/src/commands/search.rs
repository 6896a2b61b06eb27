//! `pico search` — Look up a place directly via the Places API.

use pico_core::{LocationTool, PicoConfig, ToolOutput};

pub async fn execute(config: &PicoConfig, query: &str) -> ToolOutput {
    let tool = LocationTool::new(config.tool.clone(), config.maps.clone());
    tool.search_location(query).await
}

/// Print the HTML fragment, or the explanatory text, to stdout.
/// With `json`, print the tagged result instead.
pub async fn run(config: &PicoConfig, query: &str, json: bool) -> Result<(), String> {
    let output = execute(config, query).await;
    if json {
        let value = serde_json::to_value(&output)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        super::print_json(&value);
    } else {
        println!("{}", output.content());
    }
    Ok(())
}
