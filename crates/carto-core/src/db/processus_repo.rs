//! Business process repository.
//!
//! Sub-processes are nested objects persisted as a single JSON text
//! column.

use super::query::{bind_values, UpdateBuilder};
use super::{json, DbError, DbPool};
use crate::model::{Processus, ProcessusUpdate, SousProcessus};
use async_trait::async_trait;

/// Repository for process persistence.
#[async_trait]
pub trait ProcessusRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Processus>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Processus>, DbError>;
    async fn create(&self, proc: &Processus) -> Result<Processus, DbError>;
    async fn update(&self, id: &str, update: &ProcessusUpdate) -> Result<Processus, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`ProcessusRepository`].
pub struct SqliteProcessusRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteProcessusRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, sous_processus, created_at, updated_at";

#[async_trait]
impl ProcessusRepository for SqliteProcessusRepository {
    async fn list(&self) -> Result<Vec<Processus>, DbError> {
        let rows: Vec<ProcessusRow> =
            sqlx::query_as(&format!("SELECT {} FROM processus ORDER BY nom", COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Processus>, DbError> {
        let row: Option<ProcessusRow> =
            sqlx::query_as(&format!("SELECT {} FROM processus WHERE id = ?", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, proc: &Processus) -> Result<Processus, DbError> {
        sqlx::query("INSERT INTO processus (id, nom, sous_processus) VALUES (?, ?, ?)")
            .bind(&proc.id)
            .bind(&proc.nom)
            .bind(json::to_json_text(&proc.sous_processus)?)
            .execute(&self.pool)
            .await?;

        Ok(proc.clone())
    }

    async fn update(&self, id: &str, update: &ProcessusUpdate) -> Result<Processus, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_json("sous_processus", &update.sous_processus)?;

        let sql = format!("UPDATE processus SET {} WHERE id = ?", builder.sql_set());
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Processus", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Processus", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM processus WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ProcessusRow {
    id: String,
    nom: String,
    sous_processus: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<ProcessusRow> for Processus {
    fn from(row: ProcessusRow) -> Self {
        Processus {
            id: row.id,
            nom: row.nom,
            sous_processus: json::from_json_list::<SousProcessus>(&row.sous_processus),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates a process repository backed by the given pool.
pub fn create_processus_repository(db: &DbPool) -> Box<dyn ProcessusRepository> {
    Box::new(SqliteProcessusRepository::new(db.sqlite().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    #[tokio::test]
    async fn nested_sub_processes_round_trip() {
        let db = setup_test_db().await;
        let repo = create_processus_repository(&db);

        let proc = Processus {
            id: "proc-001".to_string(),
            nom: "Vente".to_string(),
            sous_processus: vec![SousProcessus {
                id: "sp-001".to_string(),
                nom: "Prise de commande".to_string(),
                acteurs: vec!["Commercial".to_string()],
                sites: vec!["Siège Social".to_string()],
                description: Some("Saisie et validation des commandes".to_string()),
            }],
            ..Default::default()
        };

        repo.create(&proc).await.unwrap();
        let fetched = repo.get("proc-001").await.unwrap().unwrap();
        assert_eq!(fetched.sous_processus.len(), 1);
        assert_eq!(fetched.sous_processus[0].nom, "Prise de commande");
        assert_eq!(fetched.sous_processus[0].acteurs, vec!["Commercial"]);
    }
}
