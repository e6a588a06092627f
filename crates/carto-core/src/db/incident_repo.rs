//! Incident repository.
//!
//! The list operation accepts optional equality filters on `impact` and
//! `statut`, AND-combined, and orders by incident date descending.

use super::query::{bind_values, UpdateBuilder};
use super::{json, DbError, DbPool};
use crate::model::{Incident, IncidentUpdate};
use async_trait::async_trait;

/// Filter criteria for listing incidents. Both predicates are exact
/// matches.
#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    pub impact: Option<String>,
    pub statut: Option<String>,
}

impl IncidentFilter {
    pub fn is_empty(&self) -> bool {
        self.impact.is_none() && self.statut.is_none()
    }
}

/// Repository for incident persistence.
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Lists incidents matching the filter, newest first.
    async fn list(&self, filter: &IncidentFilter) -> Result<Vec<Incident>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Incident>, DbError>;
    async fn create(&self, incident: &Incident) -> Result<Incident, DbError>;
    async fn update(&self, id: &str, update: &IncidentUpdate) -> Result<Incident, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`IncidentRepository`].
pub struct SqliteIncidentRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteIncidentRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, impact, date, statut, description, duree, cout_estime, \
     cause, mesures_correctives, created_at, updated_at";

#[async_trait]
impl IncidentRepository for SqliteIncidentRepository {
    async fn list(&self, filter: &IncidentFilter) -> Result<Vec<Incident>, DbError> {
        let mut sql = format!("SELECT {} FROM incidents", COLUMNS);
        let mut conditions = Vec::new();

        if filter.impact.is_some() {
            conditions.push("impact = ?");
        }
        if filter.statut.is_some() {
            conditions.push("statut = ?");
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY date DESC");

        let mut query = sqlx::query_as::<_, IncidentRow>(&sql);
        if let Some(impact) = &filter.impact {
            query = query.bind(impact);
        }
        if let Some(statut) = &filter.statut {
            query = query.bind(statut);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Incident>, DbError> {
        let row: Option<IncidentRow> =
            sqlx::query_as(&format!("SELECT {} FROM incidents WHERE id = ?", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, incident: &Incident) -> Result<Incident, DbError> {
        sqlx::query(
            r#"
            INSERT INTO incidents
                (id, nom, impact, date, statut, description, duree, cout_estime,
                 cause, mesures_correctives)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&incident.id)
        .bind(&incident.nom)
        .bind(&incident.impact)
        .bind(&incident.date)
        .bind(&incident.statut)
        .bind(&incident.description)
        .bind(&incident.duree)
        .bind(incident.cout_estime)
        .bind(&incident.cause)
        .bind(json::to_json_text(&incident.mesures_correctives)?)
        .execute(&self.pool)
        .await?;

        Ok(incident.clone())
    }

    async fn update(&self, id: &str, update: &IncidentUpdate) -> Result<Incident, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("impact", &update.impact);
        builder.set_text("date", &update.date);
        builder.set_text("statut", &update.statut);
        builder.set_text("description", &update.description);
        builder.set_text("duree", &update.duree);
        builder.set_real("cout_estime", &update.cout_estime);
        builder.set_text("cause", &update.cause);
        builder.set_json("mesures_correctives", &update.mesures_correctives)?;

        let sql = format!("UPDATE incidents SET {} WHERE id = ?", builder.sql_set());
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Incident", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Incident", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct IncidentRow {
    id: String,
    nom: String,
    impact: Option<String>,
    date: Option<String>,
    statut: Option<String>,
    description: Option<String>,
    duree: Option<String>,
    cout_estime: Option<f64>,
    cause: Option<String>,
    mesures_correctives: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<IncidentRow> for Incident {
    fn from(row: IncidentRow) -> Self {
        Incident {
            id: row.id,
            nom: row.nom,
            impact: row.impact,
            date: row.date,
            statut: row.statut,
            description: row.description,
            duree: row.duree,
            cout_estime: row.cout_estime,
            cause: row.cause,
            mesures_correctives: json::from_json_list(&row.mesures_correctives),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates an incident repository backed by the given pool.
pub fn create_incident_repository(db: &DbPool) -> Box<dyn IncidentRepository> {
    Box::new(SqliteIncidentRepository::new(db.sqlite().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    fn incident(id: &str, nom: &str, impact: &str, statut: &str, date: &str) -> Incident {
        Incident {
            id: id.to_string(),
            nom: nom.to_string(),
            impact: Some(impact.to_string()),
            statut: Some(statut.to_string()),
            date: Some(date.to_string()),
            mesures_correctives: vec!["Restauration sauvegarde".to_string()],
            ..Default::default()
        }
    }

    async fn seed(repo: &dyn IncidentRepository) {
        repo.create(&incident("inc-1", "Panne serveur", "Critique", "Ouvert", "2024-03-01"))
            .await
            .unwrap();
        repo.create(&incident("inc-2", "Lenteur réseau", "Mineur", "Résolu", "2024-03-05"))
            .await
            .unwrap();
        repo.create(&incident("inc-3", "Fuite de données", "Critique", "Résolu", "2024-03-10"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_orders_by_date_descending() {
        let db = setup_test_db().await;
        let repo = create_incident_repository(&db);
        seed(repo.as_ref()).await;

        let all = repo.list(&IncidentFilter::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["inc-3", "inc-2", "inc-1"]);
    }

    #[tokio::test]
    async fn filters_are_and_combined() {
        let db = setup_test_db().await;
        let repo = create_incident_repository(&db);
        seed(repo.as_ref()).await;

        let critiques = repo
            .list(&IncidentFilter {
                impact: Some("Critique".to_string()),
                statut: None,
            })
            .await
            .unwrap();
        assert_eq!(critiques.len(), 2);

        let critiques_ouverts = repo
            .list(&IncidentFilter {
                impact: Some("Critique".to_string()),
                statut: Some("Ouvert".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(critiques_ouverts.len(), 1);
        assert_eq!(critiques_ouverts[0].id, "inc-1");
    }

    #[tokio::test]
    async fn corrective_measures_round_trip() {
        let db = setup_test_db().await;
        let repo = create_incident_repository(&db);
        seed(repo.as_ref()).await;

        let fetched = repo.get("inc-1").await.unwrap().unwrap();
        assert_eq!(fetched.mesures_correctives, vec!["Restauration sauvegarde"]);
    }
}
