//! `pico config` — Show the effective configuration (secrets masked).

use pico_core::PicoConfig;

pub fn render(config: &PicoConfig) -> Result<String, String> {
    serde_yaml::to_string(&config.redacted())
        .map_err(|e| format!("Failed to serialize config: {}", e))
}

pub fn show(config: &PicoConfig) -> Result<(), String> {
    print!("{}", render(config)?);
    Ok(())
}
