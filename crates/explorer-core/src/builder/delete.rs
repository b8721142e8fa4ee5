//! DELETE statement builder using the typestate pattern.
//!
//! Only the safe variant is provided: a DELETE cannot be built without a
//! WHERE clause, so a missing id can never wipe a whole table.

use std::marker::PhantomData;

use super::expr::ExprBuilder;
use super::value::SqlValue;

// Typestate markers

/// Marker: No table specified yet.
pub struct NoTable;
/// Marker: Table has been specified.
pub struct HasTable;

/// A DELETE builder that requires a WHERE clause.
pub struct SafeDelete<Table> {
    table: Option<String>,
    _state: PhantomData<Table>,
}

impl SafeDelete<NoTable> {
    /// Creates a new safe DELETE builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: None,
            _state: PhantomData,
        }
    }

    /// Specifies the table to delete from.
    #[must_use]
    pub fn from(self, table: &str) -> SafeDelete<HasTable> {
        SafeDelete {
            table: Some(String::from(table)),
            _state: PhantomData,
        }
    }
}

impl Default for SafeDelete<NoTable> {
    fn default() -> Self {
        Self::new()
    }
}

/// A DELETE statement with its WHERE clause in place; ready to build.
pub struct SafeDeleteWithWhere {
    table: String,
    where_clause: ExprBuilder,
}

impl SafeDelete<HasTable> {
    /// Adds the WHERE clause (required before `build()`).
    #[must_use]
    pub fn where_clause(self, expr: ExprBuilder) -> SafeDeleteWithWhere {
        SafeDeleteWithWhere {
            table: self.table.unwrap_or_default(),
            where_clause: expr,
        }
    }
}

impl SafeDeleteWithWhere {
    /// Builds the DELETE statement and returns SQL with parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            self.table,
            self.where_clause.sql()
        );
        (sql, self.where_clause.params().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::col;

    #[test]
    fn test_safe_delete() {
        let (sql, params) = SafeDelete::new()
            .from("users")
            .where_clause(col("id").eq(1_i64))
            .build();

        assert_eq!(sql, "DELETE FROM users WHERE id = ?");
        assert_eq!(params, vec![SqlValue::Int(1)]);
    }

    // This would fail to compile: SafeDelete without WHERE
    // #[test]
    // fn test_safe_delete_without_where_fails() {
    //     let _ = SafeDelete::new()
    //         .from("users")
    //         .build();  // Error: method `build` not found
    // }

    #[test]
    fn test_delete_sql_injection_prevention() {
        let malicious = "1; DROP TABLE users; --";
        let (sql, params) = SafeDelete::new()
            .from("users")
            .where_clause(col("id").eq(SqlValue::Text(String::from(malicious))))
            .build();

        assert_eq!(sql, "DELETE FROM users WHERE id = ?");
        assert!(matches!(&params[0], SqlValue::Text(s) if s == malicious));
    }
}
