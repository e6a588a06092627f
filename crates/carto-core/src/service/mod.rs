//! Aggregation service.
//!
//! Assembles per-layer bundles from the repositories, caches them behind a
//! TTL, and computes statistics and search results from fresh bundles.

use crate::db::{
    create_acteur_repository, create_application_repository, create_donnee_repository,
    create_ecosysteme_repository, create_etablissement_repository, create_fonction_repository,
    create_incident_repository, create_infrastructure_repository, create_processus_repository,
    create_securite_repository, DbError, DbPool, IncidentFilter,
};
use crate::model::{
    Acteur, Application, Donnee, Ecosysteme, Etablissement, Fonction, Incident, Infrastructure,
    Processus, Securite,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// How long cached bundles stay fresh.
const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Couche métier bundle.
#[derive(Debug, Clone, Serialize)]
pub struct MetierData {
    pub etablissements: Vec<Etablissement>,
    pub processus: Vec<Processus>,
    pub acteurs: Vec<Acteur>,
    pub ecosysteme: Vec<Ecosysteme>,
}

/// Couche fonctionnelle bundle.
#[derive(Debug, Clone, Serialize)]
pub struct FonctionnelData {
    pub fonctions: Vec<Fonction>,
}

/// Couche applicative bundle.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicatifData {
    pub applications: Vec<Application>,
    pub donnees: Vec<Donnee>,
}

/// Couche technique bundle. `securite` falls back to a default posture
/// when the singleton row has never been written.
#[derive(Debug, Clone, Serialize)]
pub struct TechniqueData {
    pub infrastructure: Vec<Infrastructure>,
    pub incidents: Vec<Incident>,
    pub securite: Securite,
}

/// Inventory-wide counters, computed on demand from fresh bundles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistiques {
    pub etablissements: usize,
    pub processus: usize,
    pub acteurs: usize,
    pub ecosysteme: usize,
    pub fonctions: usize,
    pub applications: usize,
    pub donnees: usize,
    pub infrastructure: usize,
    pub incidents: usize,
    pub incidents_critiques: usize,
    pub incidents_recents: usize,
    pub risques_critiques: usize,
    pub collaborateurs_total: i64,
}

/// One search hit, tagged with the entity type it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ResultatRecherche {
    Acteur(Acteur),
    Application(Application),
}

#[derive(Default)]
struct BundleCache {
    metier: Option<Arc<MetierData>>,
    fonctionnel: Option<Arc<FonctionnelData>>,
    applicatif: Option<Arc<ApplicatifData>>,
    technique: Option<Arc<TechniqueData>>,
    // One timestamp for all four slots: any bundle fetch refreshes it, so
    // a slot populated long ago can ride along on a neighbour's refresh
    // until the next invalidation.
    last_update: Option<Instant>,
}

impl BundleCache {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.last_update.is_some_and(|t| t.elapsed() < ttl)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Read-side facade over the repositories, with a TTL cache per layer
/// bundle. Writers go through the repositories directly and call
/// [`DataService::invalidate`].
pub struct DataService {
    db: DbPool,
    cache: RwLock<BundleCache>,
    ttl: Duration,
}

impl DataService {
    pub fn new(db: DbPool) -> Self {
        Self::with_ttl(db, DEFAULT_TTL)
    }

    /// Same as [`DataService::new`] with an explicit cache TTL.
    pub fn with_ttl(db: DbPool, ttl: Duration) -> Self {
        Self {
            db,
            cache: RwLock::new(BundleCache::default()),
            ttl,
        }
    }

    /// Drops every cached bundle. Called after any write.
    pub async fn invalidate(&self) {
        self.cache.write().await.clear();
        debug!("Bundle cache invalidated");
    }

    /// The business layer: establishments, processes, actors, ecosystem.
    pub async fn metier_data(&self) -> Result<Arc<MetierData>, DbError> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh(self.ttl) {
                if let Some(bundle) = &cache.metier {
                    return Ok(Arc::clone(bundle));
                }
            }
        }

        let etablissement_repo = create_etablissement_repository(&self.db);
        let processus_repo = create_processus_repository(&self.db);
        let acteur_repo = create_acteur_repository(&self.db);
        let ecosysteme_repo = create_ecosysteme_repository(&self.db);
        let (etablissements, processus, acteurs, ecosysteme) = tokio::try_join!(
            etablissement_repo.list(),
            processus_repo.list(),
            acteur_repo.list(),
            ecosysteme_repo.list(),
        )?;

        let bundle = Arc::new(MetierData {
            etablissements,
            processus,
            acteurs,
            ecosysteme,
        });

        let mut cache = self.cache.write().await;
        cache.metier = Some(Arc::clone(&bundle));
        cache.last_update = Some(Instant::now());
        Ok(bundle)
    }

    /// The functional layer: business functions.
    pub async fn fonctionnel_data(&self) -> Result<Arc<FonctionnelData>, DbError> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh(self.ttl) {
                if let Some(bundle) = &cache.fonctionnel {
                    return Ok(Arc::clone(bundle));
                }
            }
        }

        let fonctions = create_fonction_repository(&self.db).list().await?;
        let bundle = Arc::new(FonctionnelData { fonctions });

        let mut cache = self.cache.write().await;
        cache.fonctionnel = Some(Arc::clone(&bundle));
        cache.last_update = Some(Instant::now());
        Ok(bundle)
    }

    /// The application layer: applications and data assets.
    pub async fn applicatif_data(&self) -> Result<Arc<ApplicatifData>, DbError> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh(self.ttl) {
                if let Some(bundle) = &cache.applicatif {
                    return Ok(Arc::clone(bundle));
                }
            }
        }

        let application_repo = create_application_repository(&self.db);
        let donnee_repo = create_donnee_repository(&self.db);
        let (applications, donnees) = tokio::try_join!(
            application_repo.list(),
            donnee_repo.list(),
        )?;

        let bundle = Arc::new(ApplicatifData {
            applications,
            donnees,
        });

        let mut cache = self.cache.write().await;
        cache.applicatif = Some(Arc::clone(&bundle));
        cache.last_update = Some(Instant::now());
        Ok(bundle)
    }

    /// The technical layer: infrastructure, incidents, security posture.
    pub async fn technique_data(&self) -> Result<Arc<TechniqueData>, DbError> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh(self.ttl) {
                if let Some(bundle) = &cache.technique {
                    return Ok(Arc::clone(bundle));
                }
            }
        }

        let infrastructure_repo = create_infrastructure_repository(&self.db);
        let incident_repo = create_incident_repository(&self.db);
        let incident_filter = IncidentFilter::default();
        let securite_repo = create_securite_repository(&self.db);
        let (infrastructure, incidents, securite) = tokio::try_join!(
            infrastructure_repo.list(),
            incident_repo.list(&incident_filter),
            securite_repo.get(),
        )?;

        let bundle = Arc::new(TechniqueData {
            infrastructure,
            incidents,
            securite: securite.unwrap_or_else(Securite::fallback),
        });

        let mut cache = self.cache.write().await;
        cache.technique = Some(Arc::clone(&bundle));
        cache.last_update = Some(Instant::now());
        Ok(bundle)
    }

    /// Inventory-wide counters across all four layers.
    pub async fn statistiques(&self) -> Result<Statistiques, DbError> {
        let (metier, fonctionnel, applicatif, technique) = tokio::try_join!(
            self.metier_data(),
            self.fonctionnel_data(),
            self.applicatif_data(),
            self.technique_data(),
        )?;

        let incidents_critiques = technique
            .incidents
            .iter()
            .filter(|i| i.impact.as_deref() == Some("Critique"))
            .count();

        let incidents_recents = technique
            .incidents
            .iter()
            .filter(|i| i.statut.as_deref() != Some("Résolu"))
            .count();

        let applications_non_conformes = applicatif
            .applications
            .iter()
            .filter(|a| a.conformite.as_deref() == Some("Non conforme"))
            .count();

        let infrastructures_defaillantes = technique
            .infrastructure
            .iter()
            .filter(|i| i.statut.as_deref() == Some("Défaillant"))
            .count();

        let collaborateurs_total = metier
            .etablissements
            .iter()
            .filter_map(|e| e.collaborateurs.as_deref())
            .map(|c| c.trim().parse::<i64>().unwrap_or(0))
            .sum();

        Ok(Statistiques {
            etablissements: metier.etablissements.len(),
            processus: metier.processus.len(),
            acteurs: metier.acteurs.len(),
            ecosysteme: metier.ecosysteme.len(),
            fonctions: fonctionnel.fonctions.len(),
            applications: applicatif.applications.len(),
            donnees: applicatif.donnees.len(),
            infrastructure: technique.infrastructure.len(),
            incidents: technique.incidents.len(),
            incidents_critiques,
            incidents_recents,
            risques_critiques: applications_non_conformes
                + incidents_critiques
                + infrastructures_defaillantes,
            collaborateurs_total,
        })
    }

    /// Case-insensitive substring search over actors (name, role) and
    /// applications (name, domain). Results carry no ordering guarantee.
    pub async fn rechercher(&self, terme: &str) -> Result<Vec<ResultatRecherche>, DbError> {
        let needle = terme.to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let (metier, applicatif) = tokio::try_join!(self.metier_data(), self.applicatif_data())?;

        let mut resultats = Vec::new();

        for acteur in &metier.acteurs {
            let role = acteur.role.as_deref().unwrap_or("");
            if acteur.nom.to_lowercase().contains(&needle)
                || role.to_lowercase().contains(&needle)
            {
                resultats.push(ResultatRecherche::Acteur(acteur.clone()));
            }
        }

        for application in &applicatif.applications {
            let domaine = application.domaine.as_deref().unwrap_or("");
            if application.nom.to_lowercase().contains(&needle)
                || domaine.to_lowercase().contains(&needle)
            {
                resultats.push(ResultatRecherche::Application(application.clone()));
            }
        }

        Ok(resultats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;
    use crate::db::{
        create_acteur_repository, create_application_repository, create_etablissement_repository,
        create_incident_repository,
    };
    use crate::model::{Acteur, Application, Etablissement, Incident};

    async fn seed_minimal(db: &DbPool) {
        create_etablissement_repository(db)
            .create(&Etablissement {
                id: "etab-1".to_string(),
                nom: "Siège".to_string(),
                code: "SG".to_string(),
                collaborateurs: Some("120".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        create_acteur_repository(db)
            .create(&Acteur {
                id: "act-1".to_string(),
                nom: "Jeanne Moreau".to_string(),
                role: Some("Comptable".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        create_application_repository(db)
            .create(&Application {
                id: "app-1".to_string(),
                nom: "ERP Horizon".to_string(),
                domaine: Some("Gestion".to_string()),
                conformite: Some("Non conforme".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        create_incident_repository(db)
            .create(&Incident {
                id: "inc-1".to_string(),
                nom: "Panne".to_string(),
                impact: Some("Critique".to_string()),
                statut: Some("Ouvert".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn fresh_cache_serves_the_same_bundle() {
        let db = setup_test_db().await;
        seed_minimal(&db).await;
        let service = DataService::new(db);

        let first = service.metier_data().await.unwrap();
        let second = service.metier_data().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn zero_ttl_refetches_every_time() {
        let db = setup_test_db().await;
        seed_minimal(&db).await;
        let service = DataService::with_ttl(db, Duration::ZERO);

        let first = service.metier_data().await.unwrap();
        let second = service.metier_data().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn invalidate_drops_cached_bundles() {
        let db = setup_test_db().await;
        seed_minimal(&db).await;
        let service = DataService::new(db.clone());

        let before = service.metier_data().await.unwrap();
        assert_eq!(before.etablissements.len(), 1);

        create_etablissement_repository(&db)
            .create(&Etablissement {
                id: "etab-2".to_string(),
                nom: "Annexe".to_string(),
                code: "AX".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        // Still cached.
        let stale = service.metier_data().await.unwrap();
        assert_eq!(stale.etablissements.len(), 1);

        service.invalidate().await;
        let refreshed = service.metier_data().await.unwrap();
        assert_eq!(refreshed.etablissements.len(), 2);
    }

    #[tokio::test]
    async fn security_posture_falls_back_when_absent() {
        let db = setup_test_db().await;
        let service = DataService::new(db);

        let technique = service.technique_data().await.unwrap();
        assert_eq!(technique.securite.niveau.as_deref(), Some("Moyen"));
        assert_eq!(technique.securite.score_global, Some(65.0));
    }

    #[tokio::test]
    async fn statistics_count_critical_risks() {
        let db = setup_test_db().await;
        seed_minimal(&db).await;
        let service = DataService::new(db);

        let stats = service.statistiques().await.unwrap();
        assert_eq!(stats.etablissements, 1);
        assert_eq!(stats.applications, 1);
        assert_eq!(stats.incidents, 1);
        assert_eq!(stats.incidents_critiques, 1);
        assert_eq!(stats.incidents_recents, 1);
        // Non-compliant app + critical incident, no failed infrastructure.
        assert_eq!(stats.risques_critiques, 2);
        assert_eq!(stats.collaborateurs_total, 120);
    }

    #[tokio::test]
    async fn search_matches_actors_and_applications() {
        let db = setup_test_db().await;
        seed_minimal(&db).await;
        let service = DataService::new(db);

        let hits = service.rechercher("comptable").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], ResultatRecherche::Acteur(_)));

        let hits = service.rechercher("horizon").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], ResultatRecherche::Application(_)));

        assert!(service.rechercher("").await.unwrap().is_empty());
        assert!(service.rechercher("zzz").await.unwrap().is_empty());
    }
}
