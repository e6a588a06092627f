//! Serve command - starts the API server.

use anyhow::{Context, Result};
use colored::Colorize;
use std::net::SocketAddr;

use carto_api::{ApiServer, ApiServerConfig, AppState};
use carto_core::db::{create_pool, initialize_schema};

use crate::config::AppConfig;

/// Server configuration from CLI arguments.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Hostname to bind to.
    pub host: String,
    /// Database URL.
    pub database_url: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: "sqlite://cartographe.db?mode=rwc".to_string(),
        }
    }
}

/// Runs the API server.
pub async fn run_server(config: ServeConfig, app_config: AppConfig) -> Result<()> {
    println!("{} Démarrage du serveur Cartographe...", "[serveur]".cyan());

    println!("  {} Base de données: {}", "→".green(), config.database_url);
    let db = create_pool(&config.database_url)
        .await
        .context("Failed to create database connection pool")?;

    println!("  {} Initialisation du schéma...", "→".green());
    initialize_schema(&db)
        .await
        .context("Failed to initialize database schema")?;
    println!("  {} Schéma prêt", "✓".green());

    let state = AppState::new(db);

    // CARTO_BIND_ADDR wins over host/port flags when set.
    let bind_address: SocketAddr = app_config
        .bind_addr
        .unwrap_or_else(|| format!("{}:{}", config.host, config.port))
        .parse()
        .context("Invalid bind address")?;

    let server_config = ApiServerConfig { bind_address };

    println!();
    println!("{}", "Cartographe".bold());
    println!("{}", "═".repeat(40));
    println!("  {} http://{}", "Adresse:".cyan(), bind_address);
    println!("  {} http://{}/api", "API:".cyan(), bind_address);
    println!("  {} {}", "Base:".cyan(), config.database_url);
    println!();

    ApiServer::new(state, server_config)
        .run()
        .await
        .context("API server failed")
}
