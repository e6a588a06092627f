//! Application-layer entities: the application portfolio and its data
//! assets.

use serde::{Deserialize, Serialize};

/// An application in the portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: String,
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub domaine: Option<String>,
    pub criticite: Option<String>,
    pub statut: Option<String>,
    pub users: Option<String>,
    pub sites: Vec<String>,
    pub conformite: Option<String>,
    pub version: Option<String>,
    pub editeur: Option<String>,
    pub cout_annuel: Option<f64>,
    pub date_mise_en_service: Option<String>,
    pub risques: Vec<String>,
    pub fonctionnalites: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial update for an application. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationUpdate {
    pub nom: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub domaine: Option<String>,
    pub criticite: Option<String>,
    pub statut: Option<String>,
    pub users: Option<String>,
    pub sites: Option<Vec<String>>,
    pub conformite: Option<String>,
    pub version: Option<String>,
    pub editeur: Option<String>,
    pub cout_annuel: Option<f64>,
    pub date_mise_en_service: Option<String>,
    pub risques: Option<Vec<String>>,
    pub fonctionnalites: Option<Vec<String>>,
}

/// A data asset handled by the information system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Donnee {
    pub id: String,
    pub nom: String,
    pub source: Option<String>,
    pub qualite: Option<String>,
    pub volume: Option<String>,
    pub frequence_maj: Option<String>,
    pub proprietaire: Option<String>,
    pub sensibilite: Option<String>,
    pub retention: Option<String>,
    pub format: Option<String>,
    pub taille_estimee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonneeUpdate {
    pub nom: Option<String>,
    pub source: Option<String>,
    pub qualite: Option<String>,
    pub volume: Option<String>,
    pub frequence_maj: Option<String>,
    pub proprietaire: Option<String>,
    pub sensibilite: Option<String>,
    pub retention: Option<String>,
    pub format: Option<String>,
    pub taille_estimee: Option<String>,
}
