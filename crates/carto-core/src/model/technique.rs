//! Technical-layer entities: infrastructure, incidents, and the global
//! security posture.

use serde::{Deserialize, Serialize};

/// An infrastructure item (server, network gear, workstation fleet, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Infrastructure {
    pub id: String,
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub localisation: Option<String>,
    pub statut: Option<String>,
    pub capacite: Option<String>,
    pub utilisation: Option<String>,
    pub redondance: Option<String>,
    pub modele: Option<String>,
    pub date_installation: Option<String>,
    pub garantie: Option<String>,
    pub cout_acquisition: Option<f64>,
    pub maintenance: Option<String>,
    pub bande_passante: Option<String>,
    pub disponibilite: Option<String>,
    pub fournisseur: Option<String>,
    pub cout_mensuel: Option<f64>,
    pub sla: Option<String>,
    pub nombre: Option<String>,
    pub os: Option<String>,
    pub age_moyen: Option<String>,
    pub cout_total: Option<f64>,
    pub risques: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial update for an infrastructure item. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfrastructureUpdate {
    pub nom: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub localisation: Option<String>,
    pub statut: Option<String>,
    pub capacite: Option<String>,
    pub utilisation: Option<String>,
    pub redondance: Option<String>,
    pub modele: Option<String>,
    pub date_installation: Option<String>,
    pub garantie: Option<String>,
    pub cout_acquisition: Option<f64>,
    pub maintenance: Option<String>,
    pub bande_passante: Option<String>,
    pub disponibilite: Option<String>,
    pub fournisseur: Option<String>,
    pub cout_mensuel: Option<f64>,
    pub sla: Option<String>,
    pub nombre: Option<String>,
    pub os: Option<String>,
    pub age_moyen: Option<String>,
    pub cout_total: Option<f64>,
    pub risques: Option<Vec<String>>,
}

/// An operational incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    pub id: String,
    pub nom: String,
    pub impact: Option<String>,
    pub date: Option<String>,
    pub statut: Option<String>,
    pub description: Option<String>,
    pub duree: Option<String>,
    pub cout_estime: Option<f64>,
    pub cause: Option<String>,
    pub mesures_correctives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentUpdate {
    pub nom: Option<String>,
    pub impact: Option<String>,
    pub date: Option<String>,
    pub statut: Option<String>,
    pub description: Option<String>,
    pub duree: Option<String>,
    pub cout_estime: Option<f64>,
    pub cause: Option<String>,
    pub mesures_correctives: Option<Vec<String>>,
}

/// The global security posture. A singleton row with id `"global"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Securite {
    pub id: String,
    pub niveau: Option<String>,
    pub score_global: Option<f64>,
    pub derniere_evaluation: Option<String>,
    pub mesures: Vec<String>,
    pub manques: Vec<String>,
    pub incidents_total: i64,
    pub incidents_critiques: Option<i64>,
    pub incidents_majeurs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Default for Securite {
    fn default() -> Self {
        Self {
            id: super::SECURITE_ID.to_string(),
            niveau: None,
            score_global: None,
            derniere_evaluation: None,
            mesures: Vec::new(),
            manques: Vec::new(),
            incidents_total: 0,
            incidents_critiques: None,
            incidents_majeurs: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Securite {
    /// Fallback posture served when the singleton row does not exist yet.
    pub fn fallback() -> Self {
        Self {
            niveau: Some("Moyen".to_string()),
            score_global: Some(65.0),
            derniere_evaluation: Some(
                chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            ),
            ..Self::default()
        }
    }
}
