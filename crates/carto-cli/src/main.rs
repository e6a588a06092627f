//! Cartographe CLI
//!
//! Command-line interface for the Cartographe enterprise-architecture
//! inventory: serves the REST API, initializes the database schema, and
//! runs the one-time legacy data migration.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::{run_init_db, run_migrate, run_server, ServeConfig};
use config::AppConfig;

const DEFAULT_DATABASE_URL: &str = "sqlite://cartographe.db?mode=rwc";

#[derive(Parser)]
#[command(name = "cartographe")]
#[command(version)]
#[command(about = "Inventaire du système d'information", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Database URL (sqlite:)
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Create every missing table in the database
    InitDb {
        /// Database URL (sqlite:)
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Upsert the bundled legacy dataset into the database
    Migrate {
        /// Database URL (sqlite:)
        #[arg(short, long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    carto_core::logging::init_logging();

    let cli = Cli::parse();
    let app_config = AppConfig::from_env_or(DEFAULT_DATABASE_URL);

    match cli.command {
        Commands::Serve {
            port,
            host,
            database,
        } => {
            let config = ServeConfig {
                port,
                host,
                database_url: database.unwrap_or_else(|| app_config.database_url.clone()),
            };
            run_server(config, app_config).await
        }
        Commands::InitDb { database } => {
            run_init_db(&database.unwrap_or(app_config.database_url)).await
        }
        Commands::Migrate { database } => {
            run_migrate(&database.unwrap_or(app_config.database_url)).await
        }
    }
}
