//! One-time migration of the bundled legacy dataset.
//!
//! Each record is upserted individually (`INSERT OR REPLACE`), entity type
//! by entity type, with no transactional wrapping: a failure partway
//! through leaves a partially migrated store, which is acceptable for a
//! utility that is only ever run once against an empty database.

use super::{json, DbError, DbPool};
use crate::model::{
    Acteur, Application, Donnee, Ecosysteme, Etablissement, Fonction, Incident, Infrastructure,
    Processus, Securite, SECURITE_ID,
};
use serde::{Deserialize, Serialize};
use tracing::info;

const METIER_JSON: &str = include_str!("../../data/metier.json");
const FONCTIONNEL_JSON: &str = include_str!("../../data/fonctionnel.json");
const APPLICATIF_JSON: &str = include_str!("../../data/applicatif.json");
const TECHNIQUE_JSON: &str = include_str!("../../data/technique.json");

#[derive(Deserialize)]
struct MetierDataset {
    etablissements: Vec<Etablissement>,
    processus: Vec<Processus>,
    acteurs: Vec<Acteur>,
    ecosysteme: Vec<Ecosysteme>,
}

#[derive(Deserialize)]
struct FonctionnelDataset {
    fonctions: Vec<Fonction>,
}

#[derive(Deserialize)]
struct ApplicatifDataset {
    applications: Vec<Application>,
    donnees: Vec<Donnee>,
}

#[derive(Deserialize)]
struct TechniqueDataset {
    infrastructure: Vec<Infrastructure>,
    incidents: Vec<Incident>,
    securite: Securite,
}

/// Per-entity-type record counts produced by a migration run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub etablissements: usize,
    pub processus: usize,
    pub acteurs: usize,
    pub ecosysteme: usize,
    pub fonctions: usize,
    pub applications: usize,
    pub donnees: usize,
    pub infrastructure: usize,
    pub incidents: usize,
    pub securite: usize,
}

/// Upserts the bundled legacy dataset into the relational schema.
pub async fn migrate_legacy_data(db: &DbPool) -> Result<MigrationReport, DbError> {
    let metier: MetierDataset = serde_json::from_str(METIER_JSON)?;
    let fonctionnel: FonctionnelDataset = serde_json::from_str(FONCTIONNEL_JSON)?;
    let applicatif: ApplicatifDataset = serde_json::from_str(APPLICATIF_JSON)?;
    let technique: TechniqueDataset = serde_json::from_str(TECHNIQUE_JSON)?;

    let mut report = MigrationReport::default();
    let pool = db.sqlite();

    for etab in &metier.etablissements {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO etablissements
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
        .execute(pool)
        .await?;
        report.etablissements += 1;
    }
    info!(count = report.etablissements, "Établissements migrés");

    for proc in &metier.processus {
        sqlx::query("INSERT OR REPLACE INTO processus (id, nom, sous_processus) VALUES (?, ?, ?)")
            .bind(&proc.id)
            .bind(&proc.nom)
            .bind(json::to_json_text(&proc.sous_processus)?)
            .execute(pool)
            .await?;
        report.processus += 1;
    }
    info!(count = report.processus, "Processus migrés");

    for acteur in &metier.acteurs {
        sqlx::query("INSERT OR REPLACE INTO acteurs (id, nom, site, role) VALUES (?, ?, ?, ?)")
            .bind(&acteur.id)
            .bind(&acteur.nom)
            .bind(&acteur.site)
            .bind(&acteur.role)
            .execute(pool)
            .await?;
        report.acteurs += 1;
    }
    info!(count = report.acteurs, "Acteurs migrés");

    for eco in &metier.ecosysteme {
        sqlx::query("INSERT OR REPLACE INTO ecosysteme (id, nom, type, relation) VALUES (?, ?, ?, ?)")
            .bind(&eco.id)
            .bind(&eco.nom)
            .bind(&eco.kind)
            .bind(&eco.relation)
            .execute(pool)
            .await?;
        report.ecosysteme += 1;
    }
    info!(count = report.ecosysteme, "Éléments d'écosystème migrés");

    for fonction in &fonctionnel.fonctions {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO fonctions
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
        .execute(pool)
        .await?;
        report.fonctions += 1;
    }
    info!(count = report.fonctions, "Fonctions migrées");

    for app in &applicatif.applications {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO applications
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
        .execute(pool)
        .await?;
        report.applications += 1;
    }
    info!(count = report.applications, "Applications migrées");

    for donnee in &applicatif.donnees {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO donnees
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
        .execute(pool)
        .await?;
        report.donnees += 1;
    }
    info!(count = report.donnees, "Données migrées");

    for infra in &technique.infrastructure {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO infrastructure
                (id, nom, type, localisation, statut, capacite, utilisation, redondance,
                 modele, date_installation, garantie, cout_acquisition, maintenance,
                 bande_passante, disponibilite, fournisseur, cout_mensuel, sla, nombre,
                 os, age_moyen, cout_total, risques)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&infra.id)
        .bind(&infra.nom)
        .bind(&infra.kind)
        .bind(&infra.localisation)
        .bind(&infra.statut)
        .bind(&infra.capacite)
        .bind(&infra.utilisation)
        .bind(&infra.redondance)
        .bind(&infra.modele)
        .bind(&infra.date_installation)
        .bind(&infra.garantie)
        .bind(infra.cout_acquisition)
        .bind(&infra.maintenance)
        .bind(&infra.bande_passante)
        .bind(&infra.disponibilite)
        .bind(&infra.fournisseur)
        .bind(infra.cout_mensuel)
        .bind(&infra.sla)
        .bind(&infra.nombre)
        .bind(&infra.os)
        .bind(&infra.age_moyen)
        .bind(infra.cout_total)
        .bind(json::to_json_text(&infra.risques)?)
        .execute(pool)
        .await?;
        report.infrastructure += 1;
    }
    info!(count = report.infrastructure, "Éléments d'infrastructure migrés");

    for incident in &technique.incidents {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO incidents
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
        .execute(pool)
        .await?;
        report.incidents += 1;
    }
    info!(count = report.incidents, "Incidents migrés");

    let securite = &technique.securite;
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO securite
            (id, niveau, score_global, derniere_evaluation, mesures, manques,
             incidents_total, incidents_critiques, incidents_majeurs)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(SECURITE_ID)
    .bind(&securite.niveau)
    .bind(securite.score_global)
    .bind(&securite.derniere_evaluation)
    .bind(json::to_json_text(&securite.mesures)?)
    .bind(json::to_json_text(&securite.manques)?)
    .bind(securite.incidents_total)
    .bind(securite.incidents_critiques.unwrap_or(0))
    .bind(securite.incidents_majeurs.unwrap_or(0))
    .execute(pool)
    .await?;
    report.securite = 1;
    info!("Posture de sécurité migrée");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    #[tokio::test]
    async fn bundled_datasets_parse() {
        serde_json::from_str::<MetierDataset>(METIER_JSON).unwrap();
        serde_json::from_str::<FonctionnelDataset>(FONCTIONNEL_JSON).unwrap();
        serde_json::from_str::<ApplicatifDataset>(APPLICATIF_JSON).unwrap();
        serde_json::from_str::<TechniqueDataset>(TECHNIQUE_JSON).unwrap();
    }

    #[tokio::test]
    async fn migration_is_idempotent() {
        let db = setup_test_db().await;

        let first = migrate_legacy_data(&db).await.unwrap();
        assert!(first.etablissements > 0);
        assert!(first.applications > 0);
        assert_eq!(first.securite, 1);

        // Running again replaces instead of duplicating.
        let second = migrate_legacy_data(&db).await.unwrap();
        assert_eq!(second.etablissements, first.etablissements);

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM etablissements")
            .fetch_one(db.sqlite())
            .await
            .unwrap();
        assert_eq!(count.0 as usize, first.etablissements);
    }
}
