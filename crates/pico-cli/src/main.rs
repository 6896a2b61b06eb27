//! pico CLI — ask the n8n maps workflow, search places, or serve both
//! adapters over HTTP.

use clap::{Parser, Subcommand};

use pico_cli::commands::{self, ConfigOverrides};

/// pico-maps CLI — place lookups through n8n or the Places API
#[derive(Parser)]
#[command(name = "pico", version, about = "pico-maps CLI — place lookups through n8n or the Places API")]
pub struct Cli {
    /// Path to the YAML config file (default: ./pico.yaml, then the user config dir)
    #[arg(long, global = true, env = "PICO_CONFIG")]
    config: Option<String>,

    /// n8n webhook URL
    #[arg(long, global = true, env = "PICO_N8N_URL")]
    n8n_url: Option<String>,

    /// Bearer token for the n8n webhook
    #[arg(long, global = true, env = "PICO_N8N_BEARER_TOKEN", hide_env_values = true)]
    n8n_token: Option<String>,

    /// Google Maps API key (Places API + Maps Embed API)
    #[arg(long, global = true, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    maps_api_key: Option<String>,

    /// Do not print status updates while the workflow runs
    #[arg(long, global = true)]
    no_status: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message through the n8n workflow pipe
    Ask {
        /// Message text (joined with spaces)
        #[arg(required = true)]
        message: Vec<String>,
        /// Chat id sent as the workflow sessionId
        #[arg(long)]
        chat_id: Option<String>,
    },

    /// Interactive chat with the n8n workflow
    Chat {
        /// Chat id sent as the workflow sessionId (default: random)
        #[arg(long)]
        chat_id: Option<String>,
    },

    /// Search a place directly via the Places API
    Search {
        /// Place name or description (joined with spaces)
        #[arg(required = true)]
        query: Vec<String>,
        /// Print the tagged JSON result instead of the raw content
        #[arg(long)]
        json: bool,
    },

    /// Start the pico-maps HTTP server
    Server {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 3210)]
        port: u16,
    },

    /// Show the effective configuration (secrets masked)
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pico_core=warn,pico_server=info,pico_cli=info".into()),
        )
        .init();

    let overrides = ConfigOverrides {
        n8n_url: cli.n8n_url,
        n8n_bearer_token: cli.n8n_token,
        maps_api_key: cli.maps_api_key,
        no_status: cli.no_status,
    };

    let result = match commands::load_config(cli.config.as_deref(), &overrides) {
        Err(e) => Err(e),
        Ok(config) => match cli.command {
            Some(Commands::Ask { message, chat_id }) => {
                commands::ask::run(&config, &message.join(" "), chat_id.as_deref()).await
            }
            Some(Commands::Chat { chat_id }) => commands::chat::run(&config, chat_id).await,
            Some(Commands::Search { query, json }) => {
                commands::search::run(&config, &query.join(" "), json).await
            }
            Some(Commands::Server { host, port }) => {
                commands::server::run(host, port, config).await
            }
            Some(Commands::Config) => commands::config::show(&config),
            None => {
                // No subcommand — show help
                use clap::CommandFactory;
                Cli::command().print_help().ok();
                println!();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
