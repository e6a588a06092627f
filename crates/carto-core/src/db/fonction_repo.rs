//! Business function repository.

use super::query::{bind_values, UpdateBuilder};
use super::{json, DbError, DbPool};
use crate::model::{Fonction, FonctionUpdate};
use async_trait::async_trait;

/// Repository for function persistence.
#[async_trait]
pub trait FonctionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Fonction>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Fonction>, DbError>;
    async fn create(&self, fonction: &Fonction) -> Result<Fonction, DbError>;
    async fn update(&self, id: &str, update: &FonctionUpdate) -> Result<Fonction, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`FonctionRepository`].
pub struct SqliteFonctionRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteFonctionRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, description, flux, donnees, statut, niveau_automatisation, \
     frequence_utilisation, utilisateurs, sites, created_at, updated_at";

#[async_trait]
impl FonctionRepository for SqliteFonctionRepository {
    async fn list(&self) -> Result<Vec<Fonction>, DbError> {
        let rows: Vec<FonctionRow> =
            sqlx::query_as(&format!("SELECT {} FROM fonctions ORDER BY nom", COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Fonction>, DbError> {
        let row: Option<FonctionRow> =
            sqlx::query_as(&format!("SELECT {} FROM fonctions WHERE id = ?", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, fonction: &Fonction) -> Result<Fonction, DbError> {
        sqlx::query(
            r#"
            INSERT INTO fonctions
                (id, nom, description, flux, donnees, statut, niveau_automatisation,
                 frequence_utilisation, utilisateurs, sites)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fonction.id)
        .bind(&fonction.nom)
        .bind(&fonction.description)
        .bind(json::to_json_text(&fonction.flux)?)
        .bind(json::to_json_text(&fonction.donnees)?)
        .bind(&fonction.statut)
        .bind(&fonction.niveau_automatisation)
        .bind(&fonction.frequence_utilisation)
        .bind(json::to_json_text(&fonction.utilisateurs)?)
        .bind(json::to_json_text(&fonction.sites)?)
        .execute(&self.pool)
        .await?;

        Ok(fonction.clone())
    }

    async fn update(&self, id: &str, update: &FonctionUpdate) -> Result<Fonction, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("description", &update.description);
        builder.set_json("flux", &update.flux)?;
        builder.set_json("donnees", &update.donnees)?;
        builder.set_text("statut", &update.statut);
        builder.set_text("niveau_automatisation", &update.niveau_automatisation);
        builder.set_text("frequence_utilisation", &update.frequence_utilisation);
        builder.set_json("utilisateurs", &update.utilisateurs)?;
        builder.set_json("sites", &update.sites)?;

        let sql = format!("UPDATE fonctions SET {} WHERE id = ?", builder.sql_set());
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Fonction", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Fonction", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM fonctions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct FonctionRow {
    id: String,
    nom: String,
    description: Option<String>,
    flux: Option<String>,
    donnees: Option<String>,
    statut: Option<String>,
    niveau_automatisation: Option<String>,
    frequence_utilisation: Option<String>,
    utilisateurs: Option<String>,
    sites: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<FonctionRow> for Fonction {
    fn from(row: FonctionRow) -> Self {
        Fonction {
            id: row.id,
            nom: row.nom,
            description: row.description,
            flux: json::from_json_list(&row.flux),
            donnees: json::from_json_list(&row.donnees),
            statut: row.statut,
            niveau_automatisation: row.niveau_automatisation,
            frequence_utilisation: row.frequence_utilisation,
            utilisateurs: json::from_json_list(&row.utilisateurs),
            sites: json::from_json_list(&row.sites),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates a function repository backed by the given pool.
pub fn create_fonction_repository(db: &DbPool) -> Box<dyn FonctionRepository> {
    Box::new(SqliteFonctionRepository::new(db.sqlite().clone()))
}
