//! Expression builder for WHERE clauses.

use super::value::{SqlValue, ToSqlValue};

/// Creates a column reference.
///
/// The name is copied verbatim into SQL text, so it must come from the
/// discovered schema (already quoted by a dialect), never from a client.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        name: String::from(name),
    }
}

/// A column reference.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name as it appears in SQL text.
    pub name: String,
}

impl Column {
    /// Creates an equality expression against a bound value.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> ExprBuilder {
        ExprBuilder {
            sql: format!("{} = {}", self.name, SqlValue::placeholder()),
            params: vec![value.to_sql_value()],
        }
    }
}

/// A parameterized SQL expression: a SQL fragment plus its bound values.
#[derive(Debug, Clone)]
pub struct ExprBuilder {
    sql: String,
    params: Vec<SqlValue>,
}

impl ExprBuilder {
    /// Returns the SQL fragment.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound parameters, in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}
