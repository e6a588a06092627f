//! Application portfolio repository.

use super::query::{bind_values, UpdateBuilder};
use super::{json, DbError, DbPool};
use crate::model::{Application, ApplicationUpdate};
use async_trait::async_trait;

/// Repository for application persistence.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Application>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Application>, DbError>;
    async fn create(&self, app: &Application) -> Result<Application, DbError>;
    async fn update(&self, id: &str, update: &ApplicationUpdate) -> Result<Application, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`ApplicationRepository`].
pub struct SqliteApplicationRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteApplicationRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, type, domaine, criticite, statut, users, sites, conformite, \
     version, editeur, cout_annuel, date_mise_en_service, risques, fonctionnalites, \
     created_at, updated_at";

#[async_trait]
impl ApplicationRepository for SqliteApplicationRepository {
    async fn list(&self) -> Result<Vec<Application>, DbError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM applications ORDER BY nom",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Application>, DbError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM applications WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, app: &Application) -> Result<Application, DbError> {
        sqlx::query(
            r#"
            INSERT INTO applications
                (id, nom, type, domaine, criticite, statut, users, sites, conformite,
                 version, editeur, cout_annuel, date_mise_en_service, risques, fonctionnalites)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&app.id)
        .bind(&app.nom)
        .bind(&app.kind)
        .bind(&app.domaine)
        .bind(&app.criticite)
        .bind(&app.statut)
        .bind(&app.users)
        .bind(json::to_json_text(&app.sites)?)
        .bind(&app.conformite)
        .bind(&app.version)
        .bind(&app.editeur)
        .bind(app.cout_annuel)
        .bind(&app.date_mise_en_service)
        .bind(json::to_json_text(&app.risques)?)
        .bind(json::to_json_text(&app.fonctionnalites)?)
        .execute(&self.pool)
        .await?;

        Ok(app.clone())
    }

    async fn update(&self, id: &str, update: &ApplicationUpdate) -> Result<Application, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("type", &update.kind);
        builder.set_text("domaine", &update.domaine);
        builder.set_text("criticite", &update.criticite);
        builder.set_text("statut", &update.statut);
        builder.set_text("users", &update.users);
        builder.set_json("sites", &update.sites)?;
        builder.set_text("conformite", &update.conformite);
        builder.set_text("version", &update.version);
        builder.set_text("editeur", &update.editeur);
        builder.set_real("cout_annuel", &update.cout_annuel);
        builder.set_text("date_mise_en_service", &update.date_mise_en_service);
        builder.set_json("risques", &update.risques)?;
        builder.set_json("fonctionnalites", &update.fonctionnalites)?;

        let sql = format!("UPDATE applications SET {} WHERE id = ?", builder.sql_set());
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Application", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Application", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: String,
    nom: String,
    #[sqlx(rename = "type")]
    kind: Option<String>,
    domaine: Option<String>,
    criticite: Option<String>,
    statut: Option<String>,
    users: Option<String>,
    sites: Option<String>,
    conformite: Option<String>,
    version: Option<String>,
    editeur: Option<String>,
    cout_annuel: Option<f64>,
    date_mise_en_service: Option<String>,
    risques: Option<String>,
    fonctionnalites: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Application {
            id: row.id,
            nom: row.nom,
            kind: row.kind,
            domaine: row.domaine,
            criticite: row.criticite,
            statut: row.statut,
            users: row.users,
            sites: json::from_json_list(&row.sites),
            conformite: row.conformite,
            version: row.version,
            editeur: row.editeur,
            cout_annuel: row.cout_annuel,
            date_mise_en_service: row.date_mise_en_service,
            risques: json::from_json_list(&row.risques),
            fonctionnalites: json::from_json_list(&row.fonctionnalites),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates an application repository backed by the given pool.
pub fn create_application_repository(db: &DbPool) -> Box<dyn ApplicationRepository> {
    Box::new(SqliteApplicationRepository::new(db.sqlite().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    #[tokio::test]
    async fn numeric_and_list_fields_round_trip() {
        let db = setup_test_db().await;
        let repo = create_application_repository(&db);

        let app = Application {
            id: "app-001".to_string(),
            nom: "CRM".to_string(),
            kind: Some("SaaS".to_string()),
            domaine: Some("Ventes".to_string()),
            conformite: Some("Non conforme".to_string()),
            cout_annuel: Some(24_000.0),
            sites: vec!["Siège Social".to_string()],
            risques: vec!["Dépendance éditeur".to_string()],
            ..Default::default()
        };

        repo.create(&app).await.unwrap();
        let fetched = repo.get("app-001").await.unwrap().unwrap();
        assert_eq!(fetched.cout_annuel, Some(24_000.0));
        assert_eq!(fetched.kind.as_deref(), Some("SaaS"));
        assert_eq!(fetched.risques, vec!["Dépendance éditeur"]);

        let updated = repo
            .update(
                "app-001",
                &ApplicationUpdate {
                    cout_annuel: Some(30_000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.cout_annuel, Some(30_000.0));
        assert_eq!(updated.domaine.as_deref(), Some("Ventes"));
    }
}
