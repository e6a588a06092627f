//! Business-layer entities: establishments, processes, actors, and the
//! surrounding ecosystem.

use serde::{Deserialize, Serialize};

/// A physical site of the organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Etablissement {
    pub id: String,
    pub nom: String,
    pub code: String,
    pub adresse: Option<String>,
    pub statut: Option<String>,
    pub surface: Option<String>,
    pub collaborateurs: Option<String>,
    pub activites: Vec<String>,
    pub equipements: Vec<String>,
    pub risques: Vec<String>,
    pub statut_operationnel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial update for an establishment. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EtablissementUpdate {
    pub nom: Option<String>,
    pub code: Option<String>,
    pub adresse: Option<String>,
    pub statut: Option<String>,
    pub surface: Option<String>,
    pub collaborateurs: Option<String>,
    pub activites: Option<Vec<String>>,
    pub equipements: Option<Vec<String>>,
    pub risques: Option<Vec<String>>,
    pub statut_operationnel: Option<String>,
}

/// A step nested inside a business process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SousProcessus {
    pub id: String,
    pub nom: String,
    pub acteurs: Vec<String>,
    pub sites: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A business process with its ordered sub-processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Processus {
    pub id: String,
    pub nom: String,
    pub sous_processus: Vec<SousProcessus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessusUpdate {
    pub nom: Option<String>,
    pub sous_processus: Option<Vec<SousProcessus>>,
}

/// A person or role participating in processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acteur {
    pub id: String,
    pub nom: String,
    pub site: Option<String>,
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActeurUpdate {
    pub nom: Option<String>,
    pub site: Option<String>,
    pub role: Option<String>,
}

/// An external party (partner, supplier, regulator, ...) and its relation
/// to the organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ecosysteme {
    pub id: String,
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EcosystemeUpdate {
    pub nom: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub relation: Option<String>,
}
