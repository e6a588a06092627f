//! Infrastructure repository.

use super::query::{bind_values, UpdateBuilder};
use super::{json, DbError, DbPool};
use crate::model::{Infrastructure, InfrastructureUpdate};
use async_trait::async_trait;

/// Repository for infrastructure persistence.
#[async_trait]
pub trait InfrastructureRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Infrastructure>, DbError>;
    async fn get(&self, id: &str) -> Result<Option<Infrastructure>, DbError>;
    async fn create(&self, item: &Infrastructure) -> Result<Infrastructure, DbError>;
    async fn update(
        &self,
        id: &str,
        update: &InfrastructureUpdate,
    ) -> Result<Infrastructure, DbError>;
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of [`InfrastructureRepository`].
pub struct SqliteInfrastructureRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteInfrastructureRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, nom, type, localisation, statut, capacite, utilisation, redondance, \
     modele, date_installation, garantie, cout_acquisition, maintenance, bande_passante, \
     disponibilite, fournisseur, cout_mensuel, sla, nombre, os, age_moyen, cout_total, \
     risques, created_at, updated_at";

#[async_trait]
impl InfrastructureRepository for SqliteInfrastructureRepository {
    async fn list(&self) -> Result<Vec<Infrastructure>, DbError> {
        let rows: Vec<InfrastructureRow> = sqlx::query_as(&format!(
            "SELECT {} FROM infrastructure ORDER BY nom",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Infrastructure>, DbError> {
        let row: Option<InfrastructureRow> = sqlx::query_as(&format!(
            "SELECT {} FROM infrastructure WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, item: &Infrastructure) -> Result<Infrastructure, DbError> {
        sqlx::query(
            r#"
            INSERT INTO infrastructure
                (id, nom, type, localisation, statut, capacite, utilisation, redondance,
                 modele, date_installation, garantie, cout_acquisition, maintenance,
                 bande_passante, disponibilite, fournisseur, cout_mensuel, sla, nombre,
                 os, age_moyen, cout_total, risques)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.nom)
        .bind(&item.kind)
        .bind(&item.localisation)
        .bind(&item.statut)
        .bind(&item.capacite)
        .bind(&item.utilisation)
        .bind(&item.redondance)
        .bind(&item.modele)
        .bind(&item.date_installation)
        .bind(&item.garantie)
        .bind(item.cout_acquisition)
        .bind(&item.maintenance)
        .bind(&item.bande_passante)
        .bind(&item.disponibilite)
        .bind(&item.fournisseur)
        .bind(item.cout_mensuel)
        .bind(&item.sla)
        .bind(&item.nombre)
        .bind(&item.os)
        .bind(&item.age_moyen)
        .bind(item.cout_total)
        .bind(json::to_json_text(&item.risques)?)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    async fn update(
        &self,
        id: &str,
        update: &InfrastructureUpdate,
    ) -> Result<Infrastructure, DbError> {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &update.nom);
        builder.set_text("type", &update.kind);
        builder.set_text("localisation", &update.localisation);
        builder.set_text("statut", &update.statut);
        builder.set_text("capacite", &update.capacite);
        builder.set_text("utilisation", &update.utilisation);
        builder.set_text("redondance", &update.redondance);
        builder.set_text("modele", &update.modele);
        builder.set_text("date_installation", &update.date_installation);
        builder.set_text("garantie", &update.garantie);
        builder.set_real("cout_acquisition", &update.cout_acquisition);
        builder.set_text("maintenance", &update.maintenance);
        builder.set_text("bande_passante", &update.bande_passante);
        builder.set_text("disponibilite", &update.disponibilite);
        builder.set_text("fournisseur", &update.fournisseur);
        builder.set_real("cout_mensuel", &update.cout_mensuel);
        builder.set_text("sla", &update.sla);
        builder.set_text("nombre", &update.nombre);
        builder.set_text("os", &update.os);
        builder.set_text("age_moyen", &update.age_moyen);
        builder.set_real("cout_total", &update.cout_total);
        builder.set_json("risques", &update.risques)?;

        let sql = format!(
            "UPDATE infrastructure SET {} WHERE id = ?",
            builder.sql_set()
        );
        let result = bind_values(sqlx::query(&sql), builder.values())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Infrastructure", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Infrastructure", id))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM infrastructure WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct InfrastructureRow {
    id: String,
    nom: String,
    #[sqlx(rename = "type")]
    kind: Option<String>,
    localisation: Option<String>,
    statut: Option<String>,
    capacite: Option<String>,
    utilisation: Option<String>,
    redondance: Option<String>,
    modele: Option<String>,
    date_installation: Option<String>,
    garantie: Option<String>,
    cout_acquisition: Option<f64>,
    maintenance: Option<String>,
    bande_passante: Option<String>,
    disponibilite: Option<String>,
    fournisseur: Option<String>,
    cout_mensuel: Option<f64>,
    sla: Option<String>,
    nombre: Option<String>,
    os: Option<String>,
    age_moyen: Option<String>,
    cout_total: Option<f64>,
    risques: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<InfrastructureRow> for Infrastructure {
    fn from(row: InfrastructureRow) -> Self {
        Infrastructure {
            id: row.id,
            nom: row.nom,
            kind: row.kind,
            localisation: row.localisation,
            statut: row.statut,
            capacite: row.capacite,
            utilisation: row.utilisation,
            redondance: row.redondance,
            modele: row.modele,
            date_installation: row.date_installation,
            garantie: row.garantie,
            cout_acquisition: row.cout_acquisition,
            maintenance: row.maintenance,
            bande_passante: row.bande_passante,
            disponibilite: row.disponibilite,
            fournisseur: row.fournisseur,
            cout_mensuel: row.cout_mensuel,
            sla: row.sla,
            nombre: row.nombre,
            os: row.os,
            age_moyen: row.age_moyen,
            cout_total: row.cout_total,
            risques: json::from_json_list(&row.risques),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Creates an infrastructure repository backed by the given pool.
pub fn create_infrastructure_repository(db: &DbPool) -> Box<dyn InfrastructureRepository> {
    Box::new(SqliteInfrastructureRepository::new(db.sqlite().clone()))
}
