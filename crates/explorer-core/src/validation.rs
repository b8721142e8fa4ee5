//! Coercion of untyped form input into typed column values.
//!
//! Create and update follow different rules and are deliberately kept as two
//! separate entry points: a create must supply every NOT NULL column, while an
//! update touches only what it names. Neither ever writes the primary key.

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::builder::SqlValue;
use crate::error::ValidationError;
use crate::extract::Record;
use crate::schema::{Column, ColumnType, Table};

/// Raw value that stands for SQL NULL.
pub const NULL_SENTINEL: &str = "%00";

/// Validates the fields of a new record.
///
/// Every non-key column is coerced when present. A missing NOT NULL column is
/// an error; a missing nullable column is left out so the database applies
/// its default. Keys that are not columns are ignored.
///
/// # Errors
///
/// The first column whose value is missing or does not coerce.
pub fn validate_for_create<S: BuildHasher>(
    table: &Table,
    raw: &HashMap<String, String, S>,
) -> Result<Record, ValidationError> {
    let mut record = Record::new();

    for column in table.columns().iter().filter(|c| !c.is_primary_key) {
        match raw.get(&column.name) {
            Some(value) => record.push(column.name.clone(), coerce(value, column)?),
            None if !column.nullable => {
                return Err(ValidationError::CannotBeNull(column.name.clone()));
            }
            None => {}
        }
    }

    Ok(record)
}

/// Validates a partial update.
///
/// Only present non-key columns are coerced. An update that maps to no
/// writable column at all is rejected.
///
/// # Errors
///
/// The first value that does not coerce, or
/// [`ValidationError::MissingUpdateData`].
pub fn validate_for_update<S: BuildHasher>(
    table: &Table,
    raw: &HashMap<String, String, S>,
) -> Result<Record, ValidationError> {
    let mut record = Record::new();

    for column in table.columns().iter().filter(|c| !c.is_primary_key) {
        if let Some(value) = raw.get(&column.name) {
            record.push(column.name.clone(), coerce(value, column)?);
        }
    }

    if record.is_empty() {
        return Err(ValidationError::MissingUpdateData);
    }

    Ok(record)
}

/// Converts one raw string into a value of the column's semantic type.
///
/// # Errors
///
/// [`ValidationError::CannotBeNull`] for the null sentinel on a NOT NULL
/// column, [`ValidationError::InvalidType`] when the text does not parse.
pub fn coerce(raw: &str, column: &Column) -> Result<SqlValue, ValidationError> {
    if raw == NULL_SENTINEL {
        return if column.nullable {
            Ok(SqlValue::Null)
        } else {
            Err(ValidationError::CannotBeNull(column.name.clone()))
        };
    }

    let invalid = || ValidationError::InvalidType(column.name.clone());

    match column.column_type {
        ColumnType::Integer => raw.parse::<i64>().map(SqlValue::Int).map_err(|_| invalid()),
        ColumnType::Float => parse_float(raw).map(SqlValue::Float).ok_or_else(invalid),
        ColumnType::Boolean => parse_bool(raw).map(SqlValue::Bool).ok_or_else(invalid),
        ColumnType::String | ColumnType::Unknown => Ok(SqlValue::Text(raw.to_string())),
    }
}

/// Parses a decimal number, rejecting `inf` and `NaN` spellings.
///
/// Non-finite floats cannot be stored faithfully and would read back as
/// JSON `null`.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parses the boolean spellings accepted from forms.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
