//! Ecosystem element repository.

use super::query::{bind_values, UpdateBuilder};
use super::{DbError, DbPool};
use crate::model::{Ecosysteme, EcosystemeUpdate};
use async_trait::async_trait;

/// Repository for ecosystem element persistence.
#[async_trait]
pub trait EcosystemeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Ecosysteme>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Ecosysteme>, DbError>;
    async fn create(&self, element: &Ecosysteme) -> Result<Ecosysteme, DbError>;
    async fn update(&self, id: &str, update: &EcosystemeUpdate) -> Result<Ecosysteme, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`EcosystemeRepository`].
pub struct SqliteEcosystemeRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteEcosystemeRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, type, relation, created_at, updated_at";

#[async_trait]
impl EcosystemeRepository for SqliteEcosystemeRepository {
    async fn list(&self) -> Result<Vec<Ecosysteme>, DbError> {
        let rows: Vec<EcosystemeRow> =
            sqlx::query_as(&format!("SELECT {} FROM ecosysteme ORDER BY nom", COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Ecosysteme>, DbError> {
        let row: Option<EcosystemeRow> =
            sqlx::query_as(&format!("SELECT {} FROM ecosysteme WHERE id = ?", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, element: &Ecosysteme) -> Result<Ecosysteme, DbError> {
        sqlx::query("INSERT INTO ecosysteme (id, nom, type, relation) VALUES (?, ?, ?, ?)")
            .bind(&element.id)
            .bind(&element.nom)
            .bind(&element.kind)
            .bind(&element.relation)
            .execute(&self.pool)
            .await?;

        Ok(element.clone())
    }

    async fn update(&self, id: &str, update: &EcosystemeUpdate) -> Result<Ecosysteme, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("type", &update.kind);
        builder.set_text("relation", &update.relation);

        let sql = format!("UPDATE ecosysteme SET {} WHERE id = ?", builder.sql_set());
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Écosystème", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Écosystème", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM ecosysteme WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct EcosystemeRow {
    id: String,
    nom: String,
    #[sqlx(rename = "type")]
    kind: Option<String>,
    relation: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<EcosystemeRow> for Ecosysteme {
    fn from(row: EcosystemeRow) -> Self {
        Ecosysteme {
            id: row.id,
            nom: row.nom,
            kind: row.kind,
            relation: row.relation,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates an ecosystem repository backed by the given pool.
pub fn create_ecosysteme_repository(db: &DbPool) -> Box<dyn EcosystemeRepository> {
    Box::new(SqliteEcosystemeRepository::new(db.sqlite().clone()))
}
