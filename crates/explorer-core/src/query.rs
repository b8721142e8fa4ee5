//! Schema-driven statement construction.
//!
//! Each function turns a discovered [`Table`] plus validated values into SQL
//! text and its bound parameters. Only identifiers taken from the schema reach
//! the SQL text, always quoted through the [`Dialect`]; every value, including
//! paging and ids, is a bound parameter.

use crate::builder::{col, Insert, SafeDelete, Select, SqlValue, Update};
use crate::dialect::Dialect;
use crate::extract::Record;
use crate::schema::Table;

/// SQL text and its positional parameters.
pub type Statement = (String, Vec<SqlValue>);

fn quoted_columns(dialect: &dyn Dialect, table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .map(|c| dialect.quote_identifier(&c.name))
        .collect()
}

fn primary_key(dialect: &dyn Dialect, table: &Table) -> String {
    dialect.quote_identifier(&table.primary_key().name)
}

/// `SELECT <all columns> FROM <table> LIMIT ? OFFSET ?`.
#[must_use]
#[must_use]
pub fn build_select(dialect: &dyn Dialect, table: &Table, limit: u32, offset: u32) -> Statement {
    Select::new()
        .columns(&quoted_columns(dialect, table))
        .from(&dialect.quote_identifier(table.name()))
        .limit(u64::from(limit))
        .offset(u64::from(offset))
        .build()
}

/// `SELECT <all columns> FROM <table> WHERE <pk> = ?`.
#[must_use]
#[must_use]
pub fn build_select_by_id(dialect: &dyn Dialect, table: &Table, id: i64) -> Statement {
    Select::new()
        .columns(&quoted_columns(dialect, table))
        .from(&dialect.quote_identifier(table.name()))
        .where_clause(col(&primary_key(dialect, table)).eq(id))
        .build()
}

/// `INSERT INTO <table> (<fields>) VALUES (?, ...)`, or
/// `INSERT INTO <table> DEFAULT VALUES` when there is nothing to set.
#[must_use]
#[must_use]
pub fn build_insert(dialect: &dyn Dialect, table: &Table, data: &Record) -> Statement {
    let insert = Insert::new().into_table(&dialect.quote_identifier(table.name()));

    if data.is_empty() {
        return insert.default_values().build();
    }

    let columns: Vec<String> = data
        .columns()
        .into_iter()
        .map(|name| dialect.quote_identifier(name))
        .collect();

    insert.columns(&columns).values(data.values()).build()
}

/// `UPDATE <table> SET <field> = ?, ... WHERE <pk> = ?`.
///
/// Returns `None` when `data` is empty; an UPDATE needs at least one
/// assignment.
#[must_use]
#[must_use]
pub fn build_update(
    dialect: &dyn Dialect,
    table: &Table,
    id: i64,
    data: &Record,
) -> Option<Statement> {
    let mut fields = data.iter();
    let (first_name, first_value) = fields.next()?;

    let mut update = Update::new()
        .table(&dialect.quote_identifier(table.name()))
        .set(&dialect.quote_identifier(first_name), first_value.clone());
    for (name, value) in fields {
        update = update.set(&dialect.quote_identifier(name), value.clone());
    }

    Some(
        update
            .where_clause(col(&primary_key(dialect, table)).eq(id))
            .build(),
    )
}

/// `DELETE FROM <table> WHERE <pk> = ?`.
#[must_use]
#[must_use]
pub fn build_delete(dialect: &dyn Dialect, table: &Table, id: i64) -> Statement {
    SafeDelete::new()
        .from(&dialect.quote_identifier(table.name()))
        .where_clause(col(&primary_key(dialect, table)).eq(id))
        .build()
}
