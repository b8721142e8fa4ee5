//! UPDATE statement builder using the typestate pattern.
//!
//! A record update is always keyed: `build()` only exists once at least one
//! column is assigned and the WHERE clause is in place.

use std::marker::PhantomData;

use super::expr::ExprBuilder;
use super::value::{SqlValue, ToSqlValue};

/// Marker: No table specified yet.
pub struct NoTable;
/// Marker: Table has been specified.
pub struct HasTable;
/// Marker: No column assigned yet.
pub struct NoSet;
/// Marker: At least one column is assigned.
pub struct HasSet;

/// An UPDATE statement builder.
pub struct Update<Table, Set> {
    table: String,
    assignments: Vec<(String, SqlValue)>,
    _state: PhantomData<(Table, Set)>,
}

impl Update<NoTable, NoSet> {
    /// Creates a new UPDATE builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: String::new(),
            assignments: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Specifies the table to update.
    #[must_use]
    pub fn table(self, table: &str) -> Update<HasTable, NoSet> {
        Update {
            table: String::from(table),
            assignments: self.assignments,
            _state: PhantomData,
        }
    }
}

impl Default for Update<NoTable, NoSet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Set> Update<HasTable, Set> {
    /// Assigns a bound value to a column; assignments keep call order.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Update<HasTable, HasSet> {
        self.assignments
            .push((String::from(column), value.to_sql_value()));
        Update {
            table: self.table,
            assignments: self.assignments,
            _state: PhantomData,
        }
    }
}

impl Update<HasTable, HasSet> {
    /// Restricts the update to the rows matching `expr`.
    #[must_use]
    pub fn where_clause(self, expr: ExprBuilder) -> UpdateWithWhere {
        UpdateWithWhere {
            table: self.table,
            assignments: self.assignments,
            where_clause: expr,
        }
    }
}

/// An UPDATE with its assignments and WHERE clause in place; ready to build.
pub struct UpdateWithWhere {
    table: String,
    assignments: Vec<(String, SqlValue)>,
    where_clause: ExprBuilder,
}

impl UpdateWithWhere {
    /// Builds the statement. Assigned values come first in the parameter
    /// list, followed by the WHERE parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let (columns, mut params): (Vec<String>, Vec<SqlValue>) = self
            .assignments
            .into_iter()
            .map(|(column, value)| (format!("{column} = {}", SqlValue::placeholder()), value))
            .unzip();

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.table,
            columns.join(", "),
            self.where_clause.sql()
        );
        params.extend_from_slice(self.where_clause.params());
        (sql, params)
    }
}
