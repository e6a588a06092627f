//! Domain models for the four cartography layers.
//!
//! Field names are French and match the persisted column names one-to-one;
//! list-valued fields are stored as JSON text columns and round-tripped by
//! the repository layer. All structs accept partial payloads: missing fields
//! deserialize to their defaults and required fields are checked at the API
//! boundary.

mod applicatif;
mod fonctionnel;
mod metier;
mod technique;

pub use applicatif::{Application, ApplicationUpdate, Donnee, DonneeUpdate};
pub use fonctionnel::{Fonction, FonctionUpdate};
pub use metier::{
    Acteur, ActeurUpdate, Ecosysteme, EcosystemeUpdate, Etablissement, EtablissementUpdate,
    Processus, ProcessusUpdate, SousProcessus,
};
pub use technique::{Incident, IncidentUpdate, Infrastructure, InfrastructureUpdate, Securite};

use uuid::Uuid;

/// Fixed identifier of the security posture singleton.
pub const SECURITE_ID: &str = "global";

/// Returns the client-supplied identifier, or a fresh UUID when absent.
pub fn assigned_id(id: &str) -> String {
    if id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_id_keeps_provided_value() {
        assert_eq!(assigned_id("etab-001"), "etab-001");
    }

    #[test]
    fn assigned_id_generates_uuid_when_blank() {
        let id = assigned_id("  ");
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
