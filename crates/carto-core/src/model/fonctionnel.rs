//! Functional-layer entities.

use serde::{Deserialize, Serialize};

/// A business function: what the organization does, independently of the
/// applications implementing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonction {
    pub id: String,
    pub nom: String,
    pub description: Option<String>,
    pub flux: Vec<String>,
    pub donnees: Vec<String>,
    pub statut: Option<String>,
    pub niveau_automatisation: Option<String>,
    pub frequence_utilisation: Option<String>,
    pub utilisateurs: Vec<String>,
    pub sites: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial update for a function. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FonctionUpdate {
    pub nom: Option<String>,
    pub description: Option<String>,
    pub flux: Option<Vec<String>>,
    pub donnees: Option<Vec<String>>,
    pub statut: Option<String>,
    pub niveau_automatisation: Option<String>,
    pub frequence_utilisation: Option<String>,
    pub utilisateurs: Option<Vec<String>>,
    pub sites: Option<Vec<String>>,
}
