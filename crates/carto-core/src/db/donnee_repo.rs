//! Data asset repository.

use super::query::{bind_values, UpdateBuilder};
use super::{DbError, DbPool};
use crate::model::{Donnee, DonneeUpdate};
use async_trait::async_trait;

/// Repository for data asset persistence.
#[async_trait]
pub trait DonneeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Donnee>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Donnee>, DbError>;
    async fn create(&self, donnee: &Donnee) -> Result<Donnee, DbError>;
    async fn update(&self, id: &str, update: &DonneeUpdate) -> Result<Donnee, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`DonneeRepository`].
pub struct SqliteDonneeRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteDonneeRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, source, qualite, volume, frequence_maj, proprietaire, \
     sensibilite, retention, format, taille_estimee, created_at, updated_at";

#[async_trait]
impl DonneeRepository for SqliteDonneeRepository {
    async fn list(&self) -> Result<Vec<Donnee>, DbError> {
        let rows: Vec<DonneeRow> =
            sqlx::query_as(&format!("SELECT {} FROM donnees ORDER BY nom", COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Donnee>, DbError> {
        let row: Option<DonneeRow> =
            sqlx::query_as(&format!("SELECT {} FROM donnees WHERE id = ?", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, donnee: &Donnee) -> Result<Donnee, DbError> {
        sqlx::query(
            r#"
            INSERT INTO donnees
                (id, nom, source, qualite, volume, frequence_maj, proprietaire,
                 sensibilite, retention, format, taille_estimee)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&donnee.id)
        .bind(&donnee.nom)
        .bind(&donnee.source)
        .bind(&donnee.qualite)
        .bind(&donnee.volume)
        .bind(&donnee.frequence_maj)
        .bind(&donnee.proprietaire)
        .bind(&donnee.sensibilite)
        .bind(&donnee.retention)
        .bind(&donnee.format)
        .bind(&donnee.taille_estimee)
        .execute(&self.pool)
        .await?;

        Ok(donnee.clone())
    }

    async fn update(&self, id: &str, update: &DonneeUpdate) -> Result<Donnee, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("source", &update.source);
        builder.set_text("qualite", &update.qualite);
        builder.set_text("volume", &update.volume);
        builder.set_text("frequence_maj", &update.frequence_maj);
        builder.set_text("proprietaire", &update.proprietaire);
        builder.set_text("sensibilite", &update.sensibilite);
        builder.set_text("retention", &update.retention);
        builder.set_text("format", &update.format);
        builder.set_text("taille_estimee", &update.taille_estimee);

        let sql = format!("UPDATE donnees SET {} WHERE id = ?", builder.sql_set());
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Donnée", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Donnée", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM donnees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct DonneeRow {
    id: String,
    nom: String,
    source: Option<String>,
    qualite: Option<String>,
    volume: Option<String>,
    frequence_maj: Option<String>,
    proprietaire: Option<String>,
    sensibilite: Option<String>,
    retention: Option<String>,
    format: Option<String>,
    taille_estimee: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<DonneeRow> for Donnee {
    fn from(row: DonneeRow) -> Self {
        Donnee {
            id: row.id,
            nom: row.nom,
            source: row.source,
            qualite: row.qualite,
            volume: row.volume,
            frequence_maj: row.frequence_maj,
            proprietaire: row.proprietaire,
            sensibilite: row.sensibilite,
            retention: row.retention,
            format: row.format,
            taille_estimee: row.taille_estimee,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates a data asset repository backed by the given pool.
pub fn create_donnee_repository(db: &DbPool) -> Box<dyn DonneeRepository> {
    Box::new(SqliteDonneeRepository::new(db.sqlite().clone()))
}
