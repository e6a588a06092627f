//! Security posture repository.
//!
//! The `securite` table holds a single row keyed by the fixed id
//! `"global"`. Writes always target that row, regardless of the id the
//! caller supplies.

use super::{json, DbError, DbPool};
use crate::model::{Securite, SECURITE_ID};
use async_trait::async_trait;

/// Repository for the security posture singleton.
#[async_trait]
pub trait SecuriteRepository: Send + Sync {
    /// Returns the stored posture, or `None` if it was never written.
    async fn get(&self) -> Result<Option<Securite>, DbError>;
    /// Replaces the posture wholesale (insert-or-replace).
    async fn put(&self, securite: &Securite) -> Result<Securite, DbError>;
}

/// SQLite implementation of [`SecuriteRepository`].
pub struct SqliteSecuriteRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteSecuriteRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, niveau, score_global, derniere_evaluation, mesures, manques, \
     incidents_total, incidents_critiques, incidents_majeurs, created_at, updated_at";

#[async_trait]
impl SecuriteRepository for SqliteSecuriteRepository {
    async fn get(&self) -> Result<Option<Securite>, DbError> {
        let row: Option<SecuriteRow> =
            sqlx::query_as(&format!("SELECT {} FROM securite WHERE id = ?", COLUMNS))
                .bind(SECURITE_ID)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn put(&self, securite: &Securite) -> Result<Securite, DbError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO securite
                (id, niveau, score_global, derniere_evaluation, mesures, manques,
                 incidents_total, incidents_critiques, incidents_majeurs, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(SECURITE_ID)
        .bind(&securite.niveau)
        .bind(securite.score_global)
        .bind(&securite.derniere_evaluation)
        .bind(json::to_json_text(&securite.mesures)?)
        .bind(json::to_json_text(&securite.manques)?)
        .bind(securite.incidents_total)
        .bind(securite.incidents_critiques)
        .bind(securite.incidents_majeurs)
        .execute(&self.pool)
        .await?;

        self.get()
            .await?
            .ok_or_else(|| DbError::not_found("Sécurité", SECURITE_ID))
    }
}

#[derive(sqlx::FromRow)]
struct SecuriteRow {
    id: String,
    niveau: Option<String>,
    score_global: Option<f64>,
    derniere_evaluation: Option<String>,
    mesures: Option<String>,
    manques: Option<String>,
    incidents_total: Option<i64>,
    incidents_critiques: Option<i64>,
    incidents_majeurs: Option<i64>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<SecuriteRow> for Securite {
    fn from(row: SecuriteRow) -> Self {
        Securite {
            id: row.id,
            niveau: row.niveau,
            score_global: row.score_global,
            derniere_evaluation: row.derniere_evaluation,
            mesures: json::from_json_list(&row.mesures),
            manques: json::from_json_list(&row.manques),
            incidents_total: row.incidents_total.unwrap_or(0),
            incidents_critiques: row.incidents_critiques,
            incidents_majeurs: row.incidents_majeurs,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates a security posture repository backed by the given pool.
pub fn create_securite_repository(db: &DbPool) -> Box<dyn SecuriteRepository> {
    Box::new(SqliteSecuriteRepository::new(db.sqlite().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    #[tokio::test]
    async fn missing_row_reads_as_none() {
        let db = setup_test_db().await;
        let repo = create_securite_repository(&db);
        assert!(repo.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_forces_global_id_and_replaces() {
        let db = setup_test_db().await;
        let repo = create_securite_repository(&db);

        let posture = Securite {
            id: "ignored".to_string(),
            niveau: Some("Élevé".to_string()),
            score_global: Some(82.5),
            mesures: vec!["MFA".to_string(), "EDR".to_string()],
            incidents_total: 4,
            ..Default::default()
        };

        let stored = repo.put(&posture).await.unwrap();
        assert_eq!(stored.id, SECURITE_ID);
        assert_eq!(stored.score_global, Some(82.5));
        assert_eq!(stored.mesures, vec!["MFA", "EDR"]);

        let replaced = repo
            .put(&Securite {
                niveau: Some("Moyen".to_string()),
                score_global: Some(60.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(replaced.score_global, Some(60.0));
        assert!(replaced.mesures.is_empty());

        // Still a single row.
        let again = repo.get().await.unwrap().unwrap();
        assert_eq!(again.id, SECURITE_ID);
    }
}
