//! Database administration commands.

use anyhow::{Context, Result};
use colored::Colorize;

use carto_core::db::{create_pool, initialize_schema, migrate_legacy_data};

/// Creates every missing table.
pub async fn run_init_db(database_url: &str) -> Result<()> {
    println!("  {} Base de données: {}", "→".green(), database_url);
    let db = create_pool(database_url)
        .await
        .context("Failed to create database connection pool")?;

    initialize_schema(&db)
        .await
        .context("Failed to initialize database schema")?;

    println!("  {} Schéma initialisé", "✓".green());
    Ok(())
}

/// Upserts the bundled legacy dataset.
pub async fn run_migrate(database_url: &str) -> Result<()> {
    println!("  {} Base de données: {}", "→".green(), database_url);
    let db = create_pool(database_url)
        .await
        .context("Failed to create database connection pool")?;

    initialize_schema(&db)
        .await
        .context("Failed to initialize database schema")?;

    let report = migrate_legacy_data(&db)
        .await
        .context("Legacy data migration failed")?;

    println!("  {} Migration terminée", "✓".green());
    println!("    établissements: {}", report.etablissements);
    println!("    processus:      {}", report.processus);
    println!("    acteurs:        {}", report.acteurs);
    println!("    écosystème:     {}", report.ecosysteme);
    println!("    fonctions:      {}", report.fonctions);
    println!("    applications:   {}", report.applications);
    println!("    données:        {}", report.donnees);
    println!("    infrastructure: {}", report.infrastructure);
    println!("    incidents:      {}", report.incidents);
    Ok(())
}
