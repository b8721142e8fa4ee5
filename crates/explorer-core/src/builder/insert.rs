//! INSERT statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::value::{SqlValue, ToSqlValue};

// Typestate markers

/// Marker: No table specified yet.
pub struct NoTable;
/// Marker: Table has been specified.
pub struct HasTable;
/// Marker: No values specified yet.
pub struct NoValues;
/// Marker: Values have been specified.
pub struct HasValues;

/// An INSERT statement builder for a single row.
///
/// Column names and values are positional: the n-th value is bound to the
/// n-th column.
pub struct Insert<Table, Values> {
    table: Option<String>,
    columns: Vec<String>,
    values: Vec<SqlValue>,
    _state: PhantomData<(Table, Values)>,
}

impl Insert<NoTable, NoValues> {
    /// Creates a new INSERT builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: None,
            columns: Vec::new(),
            values: Vec::new(),
            _state: PhantomData,
        }
    }
}

impl Default for Insert<NoTable, NoValues> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoTable -> HasTable
impl<Values> Insert<NoTable, Values> {
    /// Specifies the table to insert into.
    #[must_use]
    pub fn into_table(self, table: &str) -> Insert<HasTable, Values> {
        Insert {
            table: Some(String::from(table)),
            columns: self.columns,
            values: self.values,
            _state: PhantomData,
        }
    }
}

// Methods available after specifying table
impl<Values> Insert<HasTable, Values> {
    /// Specifies the columns to insert into.
    #[must_use]
    pub fn columns<S: AsRef<str>>(mut self, cols: &[S]) -> Self {
        self.columns = cols.iter().map(|s| String::from(s.as_ref())).collect();
        self
    }
}

// Transition: NoValues -> HasValues
impl Insert<HasTable, NoValues> {
    /// Sets the row of values to insert.
    #[must_use]
    pub fn values<T: ToSqlValue>(self, vals: Vec<T>) -> Insert<HasTable, HasValues> {
        Insert {
            table: self.table,
            columns: self.columns,
            values: vals.into_iter().map(ToSqlValue::to_sql_value).collect(),
            _state: PhantomData,
        }
    }

    /// Inserts a row made only of column defaults.
    #[must_use]
    pub fn default_values(self) -> Insert<HasTable, HasValues> {
        Insert {
            table: self.table,
            columns: vec![],
            values: vec![],
            _state: PhantomData,
        }
    }
}

impl Insert<HasTable, HasValues> {
    /// Builds the INSERT statement and returns SQL with parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("INSERT INTO ");

        if let Some(ref table) = self.table {
            sql.push_str(table);
        }

        if self.values.is_empty() {
            sql.push_str(" DEFAULT VALUES");
            return (sql, vec![]);
        }

        if !self.columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&self.columns.join(", "));
            sql.push(')');
        }

        let placeholders: Vec<&str> = self.values.iter().map(|_| SqlValue::placeholder()).collect();
        sql.push_str(" VALUES (");
        sql.push_str(&placeholders.join(", "));
        sql.push(')');

        (sql, self.values)
    }
}
