//! Actor repository.

use super::query::{bind_values, UpdateBuilder};
use super::{DbError, DbPool};
use crate::model::{Acteur, ActeurUpdate};
use async_trait::async_trait;

/// Repository for actor persistence.
#[async_trait]
pub trait ActeurRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Acteur>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Acteur>, DbError>;
    async fn create(&self, acteur: &Acteur) -> Result<Acteur, DbError>;
    async fn update(&self, id: &str, update: &ActeurUpdate) -> Result<Acteur, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`ActeurRepository`].
pub struct SqliteActeurRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteActeurRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, site, role, created_at, updated_at";

#[async_trait]
impl ActeurRepository for SqliteActeurRepository {
    async fn list(&self) -> Result<Vec<Acteur>, DbError> {
        let rows: Vec<ActeurRow> =
            sqlx::query_as(&format!("SELECT {} FROM acteurs ORDER BY nom", COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Acteur>, DbError> {
        let row: Option<ActeurRow> =
            sqlx::query_as(&format!("SELECT {} FROM acteurs WHERE id = ?", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, acteur: &Acteur) -> Result<Acteur, DbError> {
        sqlx::query("INSERT INTO acteurs (id, nom, site, role) VALUES (?, ?, ?, ?)")
            .bind(&acteur.id)
            .bind(&acteur.nom)
            .bind(&acteur.site)
            .bind(&acteur.role)
            .execute(&self.pool)
            .await?;

        Ok(acteur.clone())
    }

    async fn update(&self, id: &str, update: &ActeurUpdate) -> Result<Acteur, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("site", &update.site);
        builder.set_text("role", &update.role);

        let sql = format!("UPDATE acteurs SET {} WHERE id = ?", builder.sql_set());
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Acteur", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Acteur", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM acteurs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ActeurRow {
    id: String,
    nom: String,
    site: Option<String>,
    role: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<ActeurRow> for Acteur {
    fn from(row: ActeurRow) -> Self {
        Acteur {
            id: row.id,
            nom: row.nom,
            site: row.site,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates an actor repository backed by the given pool.
pub fn create_acteur_repository(db: &DbPool) -> Box<dyn ActeurRepository> {
    Box::new(SqliteActeurRepository::new(db.sqlite().clone()))
}
