use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use placement::api;
use placement::config;
use placement::store::PgStore;

#[derive(Parser)]
#[command(name = "placement", about = "Placement management backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind host, overriding HOST
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overriding PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create the database schema
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placement=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = config::load_config();

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let store = PgStore::connect(&config.database).await?;
            store.migrate().await?;

            api::run_server(config, Arc::new(store)).await?;
        }
        Commands::Migrate => {
            let store = PgStore::connect(&config.database).await?;
            store.migrate().await?;
        }
    }

    Ok(())
}
