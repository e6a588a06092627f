//! JSON text-column helpers.
//!
//! List-valued and nested-object attributes are persisted as JSON text and
//! must round-trip through these helpers on every read and write. A stored
//! value that fails to decode yields an empty list rather than an error.

use super::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes a list-valued field for storage in a TEXT column.
pub fn to_json_text<T: Serialize>(value: &T) -> Result<String, DbError> {
    Ok(serde_json::to_string(value)?)
}

/// Decodes a JSON TEXT column into a list.
///
/// `NULL`, the empty string, and malformed JSON all decode to an empty
/// list.
pub fn from_json_list<T: DeserializeOwned>(text: &Option<String>) -> Vec<T> {
    match text.as_deref() {
        Some(t) if !t.is_empty() => serde_json::from_str(t).unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_string_list() {
        let risques = vec!["Incendie".to_string(), "Inondation".to_string()];
        let text = to_json_text(&risques).unwrap();
        let decoded: Vec<String> = from_json_list(&Some(text));
        assert_eq!(decoded, risques);
    }

    #[test]
    fn null_decodes_to_empty_list() {
        let decoded: Vec<String> = from_json_list(&None);
        assert!(decoded.is_empty());
    }

    #[test]
    fn malformed_json_decodes_to_empty_list() {
        let decoded: Vec<String> = from_json_list(&Some("{not json".to_string()));
        assert!(decoded.is_empty());
    }

    #[test]
    fn empty_string_decodes_to_empty_list() {
        let decoded: Vec<String> = from_json_list(&Some(String::new()));
        assert!(decoded.is_empty());
    }
}
