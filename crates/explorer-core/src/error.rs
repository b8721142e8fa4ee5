//! Error types for discovery, validation, extraction and record access.

use std::error::Error as StdError;

/// Rejection of client-supplied field values.
///
/// The display strings are returned to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A NOT NULL column was absent on create, or received the null sentinel.
    #[error("{0} cannot be null")]
    CannotBeNull(String),

    /// The raw value does not parse as the column's semantic type.
    #[error("invalid type {0}")]
    InvalidType(String),

    /// An update carried no field that maps to a writable column.
    #[error("missing data to update")]
    MissingUpdateData,
}

/// Opaque failure reported by a database driver.
#[derive(Debug, thiserror::Error)]
#[error("database error: {source}")]
pub struct StoreError {
    source: Box<dyn StdError + Send + Sync>,
}

impl StoreError {
    /// Wraps a driver error.
    #[must_use]
    pub fn backend(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { source: err.into() }
    }
}

/// Errors raised while introspecting the database schema.
///
/// All of them are fatal: no partial schema is ever used.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The catalog could not list tables.
    #[error("unable to list tables: {0}")]
    ListTables(#[source] StoreError),

    /// Column metadata for a table could not be read.
    #[error("unable to read columns of table '{table}': {source}")]
    Columns {
        /// Table being introspected.
        table: String,
        /// Driver error.
        source: StoreError,
    },

    /// Primary-key metadata for a table could not be read.
    #[error("unable to read primary key of table '{table}': {source}")]
    PrimaryKey {
        /// Table being introspected.
        table: String,
        /// Driver error.
        source: StoreError,
    },

    /// The driver did not report whether a column accepts NULL.
    #[error("nullability of column '{table}.{column}' is unknown")]
    IndeterminateNullability {
        /// Table owning the column.
        table: String,
        /// Column name.
        column: String,
    },

    /// The table's primary key is missing or spans several columns.
    #[error("table '{table}' must have exactly one primary key column, found {found}")]
    UnsupportedPrimaryKey {
        /// Table name.
        table: String,
        /// Number of primary-key columns found.
        found: usize,
    },

    /// Column metadata does not form a valid table definition.
    #[error("invalid definition for table '{table}': {reason}")]
    InvalidTable {
        /// Table name.
        table: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// A scanned row could not be mapped onto the table definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// The row does not carry one value per column.
    #[error("row has {actual} values, table '{table}' has {expected} columns")]
    RowWidth {
        /// Table name.
        table: String,
        /// Column count of the table.
        expected: usize,
        /// Value count of the row.
        actual: usize,
    },

    /// A byte-string value of a Float column is not a number.
    #[error("column '{column}' holds a non-numeric value: {value:?}")]
    InvalidFloat {
        /// Column name.
        column: String,
        /// The offending text.
        value: String,
    },
}

/// Errors returned by [`crate::service::RecordService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The table is not part of the discovered schema.
    #[error("table not found")]
    TableNotFound,

    /// No row matches the primary key.
    #[error("record not found")]
    RecordNotFound,

    /// Client input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The database call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A row could not be converted into a record.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Result type for record service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
