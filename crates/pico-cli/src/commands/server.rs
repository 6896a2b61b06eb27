//! `pico server` — Start the pico-maps HTTP server.

use pico_core::PicoConfig;

pub async fn run(host: String, port: u16, adapters: PicoConfig) -> Result<(), String> {
    let config = pico_server::ServerConfig {
        host: host.clone(),
        port,
        adapters,
    };

    println!("Starting pico-maps server on {}:{}...", host, port);

    let addr = pico_server::start_server(config).await?;
    println!("pico-maps server listening on http://{}", addr);

    // Keep the process running until interrupted
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl+C: {}", e))?;

    println!("\nShutting down...");
    Ok(())
}
