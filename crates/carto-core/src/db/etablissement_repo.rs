//! Establishment repository.

use super::query::{bind_values, UpdateBuilder};
use super::{json, DbError, DbPool};
use crate::model::{Etablissement, EtablissementUpdate};
use async_trait::async_trait;

/// Repository for establishment persistence.
#[async_trait]
pub trait EtablissementRepository: Send + Sync {
    /// Lists every establishment, ordered by name.
    async fn list(&self) -> Result<Vec<Etablissement>, DbError>;

    /// Gets an establishment by id.
    async fn get(&self, id: &str) -> Result<Option<Etablissement>, DbError>;

    /// Inserts an establishment and echoes the input back. The caller is
    /// responsible for assigning an id first.
    async fn create(&self, etab: &Etablissement) -> Result<Etablissement, DbError>;

    /// Applies a partial update and returns the stored row.
    async fn update(&self, id: &str, update: &EtablissementUpdate)
        -> Result<Etablissement, DbError>;

    /// Deletes by id. Returns false when no row matched.
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`EtablissementRepository`].
pub struct SqliteEtablissementRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteEtablissementRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, code, adresse, statut, surface, collaborateurs, \
     activites, equipements, risques, statut_operationnel, created_at, updated_at";

#[async_trait]
impl EtablissementRepository for SqliteEtablissementRepository {
    async fn list(&self) -> Result<Vec<Etablissement>, DbError> {
        let rows: Vec<EtablissementRow> = sqlx::query_as(&format!(
            "SELECT {} FROM etablissements ORDER BY nom",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Etablissement>, DbError> {
        let row: Option<EtablissementRow> = sqlx::query_as(&format!(
            "SELECT {} FROM etablissements WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, etab: &Etablissement) -> Result<Etablissement, DbError> {
        sqlx::query(
            r#"
            INSERT INTO etablissements
                (id, nom, code, adresse, statut, surface, collaborateurs,
                 activites, equipements, risques, statut_operationnel)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&etab.id)
        .bind(&etab.nom)
        .bind(&etab.code)
        .bind(&etab.adresse)
        .bind(&etab.statut)
        .bind(&etab.surface)
        .bind(&etab.collaborateurs)
        .bind(json::to_json_text(&etab.activites)?)
        .bind(json::to_json_text(&etab.equipements)?)
        .bind(json::to_json_text(&etab.risques)?)
        .bind(&etab.statut_operationnel)
        .execute(&self.pool)
        .await?;

        Ok(etab.clone())
    }

    async fn update(
        &self,
        id: &str,
        update: &EtablissementUpdate,
    ) -> Result<Etablissement, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("code", &update.code);
        builder.set_text("adresse", &update.adresse);
        builder.set_text("statut", &update.statut);
        builder.set_text("surface", &update.surface);
        builder.set_text("collaborateurs", &update.collaborateurs);
        builder.set_json("activites", &update.activites)?;
        builder.set_json("equipements", &update.equipements)?;
        builder.set_json("risques", &update.risques)?;
        builder.set_text("statut_operationnel", &update.statut_operationnel);

        let sql = format!(
            "UPDATE etablissements SET {} WHERE id = ?",
            builder.sql_set()
        );
        let query = bind_values(sqlx::query(&sql), builder.values()).bind(id);
        let result = query.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Établissement", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Établissement", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM etablissements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct EtablissementRow {
    id: String,
    nom: String,
    code: String,
    adresse: Option<String>,
    statut: Option<String>,
    surface: Option<String>,
    collaborateurs: Option<String>,
    activites: Option<String>,
    equipements: Option<String>,
    risques: Option<String>,
    statut_operationnel: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<EtablissementRow> for Etablissement {
    fn from(row: EtablissementRow) -> Self {
        Etablissement {
            id: row.id,
            nom: row.nom,
            code: row.code,
            adresse: row.adresse,
            statut: row.statut,
            surface: row.surface,
            collaborateurs: row.collaborateurs,
            activites: json::from_json_list(&row.activites),
            equipements: json::from_json_list(&row.equipements),
            risques: json::from_json_list(&row.risques),
            statut_operationnel: row.statut_operationnel,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates an establishment repository backed by the given pool.
pub fn create_etablissement_repository(db: &DbPool) -> Box<dyn EtablissementRepository> {
    Box::new(SqliteEtablissementRepository::new(db.sqlite().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;
    use crate::model::assigned_id;

    fn siege() -> Etablissement {
        Etablissement {
            id: "etab-001".to_string(),
            nom: "Siège Social".to_string(),
            code: "SS".to_string(),
            adresse: Some("123 Rue Example".to_string()),
            statut: Some("Actif".to_string()),
            collaborateurs: Some("150".to_string()),
            activites: vec!["Administration".to_string(), "Direction".to_string()],
            risques: vec!["Incendie".to_string(), "Inondation".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_all_fields() {
        let db = setup_test_db().await;
        let repo = create_etablissement_repository(&db);

        let created = repo.create(&siege()).await.unwrap();
        assert_eq!(created, siege());

        let fetched = repo.get("etab-001").await.unwrap().unwrap();
        assert_eq!(fetched.nom, "Siège Social");
        assert_eq!(fetched.code, "SS");
        assert_eq!(fetched.risques, vec!["Incendie", "Inondation"]);
        assert_eq!(fetched.activites, vec!["Administration", "Direction"]);
        assert!(fetched.created_at.is_some());
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let db = setup_test_db().await;
        let repo = create_etablissement_repository(&db);

        let mut b = siege();
        b.id = "etab-002".to_string();
        b.nom = "Agence Bordeaux".to_string();
        repo.create(&siege()).await.unwrap();
        repo.create(&b).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].nom, "Agence Bordeaux");
        assert_eq!(all[1].nom, "Siège Social");
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() {
        let db = setup_test_db().await;
        let repo = create_etablissement_repository(&db);
        repo.create(&siege()).await.unwrap();

        let updated = repo
            .update(
                "etab-001",
                &EtablissementUpdate {
                    statut: Some("Fermé".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.statut.as_deref(), Some("Fermé"));
        assert_eq!(updated.nom, "Siège Social");
        assert_eq!(updated.adresse.as_deref(), Some("123 Rue Example"));
        assert_eq!(updated.risques, vec!["Incendie", "Inondation"]);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let db = setup_test_db().await;
        let repo = create_etablissement_repository(&db);

        let err = repo
            .update("absent", &EtablissementUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_then_get_is_gone() {
        let db = setup_test_db().await;
        let repo = create_etablissement_repository(&db);
        repo.create(&siege()).await.unwrap();

        assert!(repo.delete("etab-001").await.unwrap());
        assert!(repo.get("etab-001").await.unwrap().is_none());
        assert!(!repo.delete("etab-001").await.unwrap());
    }

    #[tokio::test]
    async fn generated_ids_are_unique() {
        let a = assigned_id("");
        let b = assigned_id("");
        assert_ne!(a, b);
    }
}
