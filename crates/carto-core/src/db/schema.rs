//! Database schema.
//!
//! One table per entity type. List-valued fields are TEXT columns holding
//! JSON. Tables are created on demand (`/api/init-db` and at server start);
//! every statement is idempotent.

use super::{DbError, DbPool};
use tracing::info;

/// SQL statements creating the schema, one per table.
pub mod sql {
    /// Couche métier.
    pub const CREATE_ETABLISSEMENTS_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS etablissements (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            code TEXT NOT NULL,
            adresse TEXT,
            statut TEXT,
            surface TEXT,
            collaborateurs TEXT,
            activites TEXT,
            equipements TEXT,
            risques TEXT,
            statut_operationnel TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub const CREATE_PROCESSUS_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS processus (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            sous_processus TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub const CREATE_ACTEURS_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS acteurs (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            site TEXT,
            role TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub const CREATE_ECOSYSTEME_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS ecosysteme (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            type TEXT,
            relation TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    /// Couche fonctionnelle.
    pub const CREATE_FONCTIONS_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS fonctions (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            description TEXT,
            flux TEXT,
            donnees TEXT,
            statut TEXT,
            niveau_automatisation TEXT,
            frequence_utilisation TEXT,
            utilisateurs TEXT,
            sites TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    /// Couche applicative.
    pub const CREATE_APPLICATIONS_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS applications (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            type TEXT,
            domaine TEXT,
            criticite TEXT,
            statut TEXT,
            users TEXT,
            sites TEXT,
            conformite TEXT,
            version TEXT,
            editeur TEXT,
            cout_annuel REAL,
            date_mise_en_service TEXT,
            risques TEXT,
            fonctionnalites TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub const CREATE_DONNEES_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS donnees (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            source TEXT,
            qualite TEXT,
            volume TEXT,
            frequence_maj TEXT,
            proprietaire TEXT,
            sensibilite TEXT,
            retention TEXT,
            format TEXT,
            taille_estimee TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    /// Couche technique.
    pub const CREATE_INFRASTRUCTURE_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS infrastructure (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            type TEXT,
            localisation TEXT,
            statut TEXT,
            capacite TEXT,
            utilisation TEXT,
            redondance TEXT,
            modele TEXT,
            date_installation TEXT,
            garantie TEXT,
            cout_acquisition REAL,
            maintenance TEXT,
            bande_passante TEXT,
            disponibilite TEXT,
            fournisseur TEXT,
            cout_mensuel REAL,
            sla TEXT,
            nombre TEXT,
            os TEXT,
            age_moyen TEXT,
            cout_total REAL,
            risques TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub const CREATE_INCIDENTS_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS incidents (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL,
            impact TEXT,
            date TEXT,
            statut TEXT,
            description TEXT,
            duree TEXT,
            cout_estime REAL,
            cause TEXT,
            mesures_correctives TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub const CREATE_SECURITE_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS securite (
            id TEXT PRIMARY KEY DEFAULT 'global',
            niveau TEXT,
            score_global REAL,
            derniere_evaluation TEXT,
            mesures TEXT,
            manques TEXT,
            incidents_total INTEGER,
            incidents_critiques INTEGER,
            incidents_majeurs INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;
}

/// Every table-creation statement, in layer order.
pub const ALL_TABLES: &[&str] = &[
    sql::CREATE_ETABLISSEMENTS_TABLE,
    sql::CREATE_PROCESSUS_TABLE,
    sql::CREATE_ACTEURS_TABLE,
    sql::CREATE_ECOSYSTEME_TABLE,
    sql::CREATE_FONCTIONS_TABLE,
    sql::CREATE_APPLICATIONS_TABLE,
    sql::CREATE_DONNEES_TABLE,
    sql::CREATE_INFRASTRUCTURE_TABLE,
    sql::CREATE_INCIDENTS_TABLE,
    sql::CREATE_SECURITE_TABLE,
];

/// Creates every table that does not exist yet.
pub async fn initialize_schema(db: &DbPool) -> Result<(), DbError> {
    for statement in ALL_TABLES {
        sqlx::query(statement)
            .execute(db.sqlite())
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
    }
    info!("Database schema initialized");
    Ok(())
}
