//! SELECT statement builder using the typestate pattern.
//!
//! `build()` is only available once both the projection and the FROM clause
//! are specified. LIMIT and OFFSET are bound as parameters like any other
//! value, so a crafted paging value cannot change the statement text.

use std::marker::PhantomData;

use super::expr::ExprBuilder;
use super::value::SqlValue;

// Typestate markers (zero-sized types)

/// Marker: No columns specified yet.
pub struct NoColumns;
/// Marker: Columns have been specified.
pub struct HasColumns;
/// Marker: No FROM clause specified yet.
pub struct NoFrom;
/// Marker: FROM clause has been specified.
pub struct HasFrom;

/// A SELECT statement builder over schema-derived identifiers.
pub struct Select<Cols, From> {
    columns: Vec<String>,
    from: Option<String>,
    where_clause: Option<ExprBuilder>,
    limit: Option<u64>,
    offset: Option<u64>,
    _state: PhantomData<(Cols, From)>,
}

impl Select<NoColumns, NoFrom> {
    /// Creates a new SELECT builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            from: None,
            where_clause: None,
            limit: None,
            offset: None,
            _state: PhantomData,
        }
    }
}

impl Default for Select<NoColumns, NoFrom> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoColumns -> HasColumns
impl<From> Select<NoColumns, From> {
    /// Specifies the columns to select.
    #[must_use]
    pub fn columns<S: AsRef<str>>(self, cols: &[S]) -> Select<HasColumns, From> {
        Select {
            columns: cols.iter().map(|s| String::from(s.as_ref())).collect(),
            from: self.from,
            where_clause: self.where_clause,
            limit: self.limit,
            offset: self.offset,
            _state: PhantomData,
        }
    }
}

// Transition: NoFrom -> HasFrom
impl<Cols> Select<Cols, NoFrom> {
    /// Specifies the table to select from.
    #[must_use]
    pub fn from(self, table: &str) -> Select<Cols, HasFrom> {
        Select {
            columns: self.columns,
            from: Some(String::from(table)),
            where_clause: self.where_clause,
            limit: self.limit,
            offset: self.offset,
            _state: PhantomData,
        }
    }
}

// Methods available after FROM
impl<Cols> Select<Cols, HasFrom> {
    /// Adds a WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, expr: ExprBuilder) -> Self {
        self.where_clause = Some(expr);
        self
    }

    /// Adds a LIMIT clause.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Adds an OFFSET clause.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl Select<HasColumns, HasFrom> {
    /// Builds the SELECT statement and returns SQL with parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("SELECT ");
        let mut params = vec![];

        sql.push_str(&self.columns.join(", "));

        if let Some(ref table) = self.from {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        if let Some(ref where_expr) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(where_expr.sql());
            params.extend(where_expr.params().iter().cloned());
        }

        if let Some(n) = self.limit {
            sql.push_str(" LIMIT ?");
            params.push(SqlValue::Int(clamp_to_i64(n)));
        }

        if let Some(n) = self.offset {
            sql.push_str(" OFFSET ?");
            params.push(SqlValue::Int(clamp_to_i64(n)));
        }

        (sql, params)
    }
}

fn clamp_to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
