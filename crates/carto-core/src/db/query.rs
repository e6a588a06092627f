//! Dynamic UPDATE statement building.
//!
//! Updates are partial: only the fields present in the patch are written,
//! so the SET clause has to be assembled at runtime. `updated_at` is always
//! refreshed.

use super::{json, DbError};
use serde::Serialize;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

/// A staged bind value for a dynamically built statement.
pub(crate) enum SqlValue {
    Text(String),
    Real(f64),
    Int(i64),
}

/// Accumulates SET clauses and their bind values.
pub(crate) struct UpdateBuilder {
    clauses: Vec<String>,
    values: Vec<SqlValue>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self {
            clauses: vec!["updated_at = CURRENT_TIMESTAMP".to_string()],
            values: Vec::new(),
        }
    }

    pub fn set_text(&mut self, column: &str, value: &Option<String>) {
        if let Some(v) = value {
            self.clauses.push(format!("{} = ?", column));
            self.values.push(SqlValue::Text(v.clone()));
        }
    }

    pub fn set_real(&mut self, column: &str, value: &Option<f64>) {
        if let Some(v) = value {
            self.clauses.push(format!("{} = ?", column));
            self.values.push(SqlValue::Real(*v));
        }
    }

    #[allow(dead_code)]
    pub fn set_int(&mut self, column: &str, value: &Option<i64>) {
        if let Some(v) = value {
            self.clauses.push(format!("{} = ?", column));
            self.values.push(SqlValue::Int(*v));
        }
    }

    /// Stages a list-valued field, serialized to JSON text.
    pub fn set_json<T: Serialize>(
        &mut self,
        column: &str,
        value: &Option<T>,
    ) -> Result<(), DbError> {
        if let Some(v) = value {
            self.clauses.push(format!("{} = ?", column));
            self.values.push(SqlValue::Text(json::to_json_text(v)?));
        }
        Ok(())
    }

    pub fn sql_set(&self) -> String {
        self.clauses.join(", ")
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }
}

/// Binds staged values onto a query, in order.
pub(crate) fn bind_values<'q>(
    mut query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    values: &'q [SqlValue],
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Real(f) => query.bind(*f),
            SqlValue::Int(i) => query.bind(*i),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_refreshes_updated_at() {
        let builder = UpdateBuilder::new();
        assert_eq!(builder.sql_set(), "updated_at = CURRENT_TIMESTAMP");
        assert!(builder.values().is_empty());
    }

    #[test]
    fn stages_only_present_fields() {
        let mut builder = UpdateBuilder::new();
        builder.set_text("nom", &Some("Siège".to_string()));
        builder.set_text("adresse", &None);
        builder.set_real("cout_annuel", &Some(1200.0));
        builder
            .set_json("risques", &Some(vec!["Incendie".to_string()]))
            .unwrap();

        assert_eq!(
            builder.sql_set(),
            "updated_at = CURRENT_TIMESTAMP, nom = ?, cout_annuel = ?, risques = ?"
        );
        assert_eq!(builder.values().len(), 3);
    }
}
