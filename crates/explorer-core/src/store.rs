//! Driver seam for executing built statements.

use futures::future::BoxFuture;

use crate::builder::SqlValue;
use crate::error::StoreError;
use crate::extract::ScannedValue;

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Number of rows changed.
    pub rows_affected: u64,
    /// Rowid of the last inserted row, when the driver reports one.
    pub last_insert_id: i64,
}

/// Executes parameterized statements against a database.
///
/// Implementations acquire a connection for each call and release it before
/// the returned future resolves, on success and on error alike. Rows are
/// fully materialized, one [`ScannedValue`] per selected column.
pub trait RecordStore: Send + Sync {
    /// Runs a query and returns every row.
    fn fetch_all<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<Vec<Vec<ScannedValue>>, StoreError>>;

    /// Runs a query and returns its first row, if any.
    fn fetch_optional<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<Option<Vec<ScannedValue>>, StoreError>>;

    /// Runs a write statement.
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<ExecOutcome, StoreError>>;
}
