//! Persistence layer: connection pooling, schema management, and one
//! repository per entity type.

mod error;
pub(crate) mod json;
mod pool;
pub(crate) mod query;
mod schema;
pub mod seed;
pub mod test_support;

pub mod acteur_repo;
pub mod application_repo;
pub mod donnee_repo;
pub mod ecosysteme_repo;
pub mod etablissement_repo;
pub mod fonction_repo;
pub mod incident_repo;
pub mod infrastructure_repo;
pub mod processus_repo;
pub mod securite_repo;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use schema::{initialize_schema, ALL_TABLES};

pub use acteur_repo::{create_acteur_repository, ActeurRepository};
pub use application_repo::{create_application_repository, ApplicationRepository};
pub use donnee_repo::{create_donnee_repository, DonneeRepository};
pub use ecosysteme_repo::{create_ecosysteme_repository, EcosystemeRepository};
pub use etablissement_repo::{create_etablissement_repository, EtablissementRepository};
pub use fonction_repo::{create_fonction_repository, FonctionRepository};
pub use incident_repo::{create_incident_repository, IncidentFilter, IncidentRepository};
pub use infrastructure_repo::{create_infrastructure_repository, InfrastructureRepository};
pub use processus_repo::{create_processus_repository, ProcessusRepository};
pub use securite_repo::{create_securite_repository, SecuriteRepository};
pub use seed::{migrate_legacy_data, MigrationReport};
