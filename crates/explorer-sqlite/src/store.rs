//! Statement execution over a SQLite pool.

use explorer_core::{ExecOutcome, RecordStore, ScannedValue, SqlValue, StoreError};
use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, TypeInfo, ValueRef};

use crate::store_error;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// [`RecordStore`] backed by a [`SqlitePool`].
///
/// Every call checks a connection out of the pool for the duration of one
/// statement; rows are decoded before it goes back.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store executing on `pool`.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl RecordStore for SqliteStore {
    fn fetch_all<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<Vec<Vec<ScannedValue>>, StoreError>> {
        Box::pin(async move {
            let rows = bind_params(sqlx::query(sql), params)
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;
            rows.iter().map(scan_row).collect::<Result<_, _>>().map_err(store_error)
        })
    }

    fn fetch_optional<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<Option<Vec<ScannedValue>>, StoreError>> {
        Box::pin(async move {
            let row = bind_params(sqlx::query(sql), params)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;
            row.as_ref().map(scan_row).transpose().map_err(store_error)
        })
    }

    fn execute<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<ExecOutcome, StoreError>> {
        Box::pin(async move {
            let result = bind_params(sqlx::query(sql), params)
                .execute(&self.pool)
                .await
                .map_err(store_error)?;
            Ok(ExecOutcome {
                rows_affected: result.rows_affected(),
                last_insert_id: result.last_insert_rowid(),
            })
        })
    }
}

fn bind_params<'q>(mut query: SqliteQuery<'q>, params: &'q [SqlValue]) -> SqliteQuery<'q> {
    for param in params {
        query = bind_param_raw(query, param);
    }
    query
}

/// Binds a SqlValue parameter to a raw query.
fn bind_param_raw<'q>(query: SqliteQuery<'q>, value: &'q SqlValue) -> SqliteQuery<'q> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int(i) => query.bind(*i),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Text(s) => query.bind(s.as_str()),
    }
}

/// Decodes every cell of a row according to its storage class.
fn scan_row(row: &SqliteRow) -> Result<Vec<ScannedValue>, sqlx::Error> {
    (0..row.len()).map(|index| scan_value(row, index)).collect()
}

fn scan_value(row: &SqliteRow, index: usize) -> Result<ScannedValue, sqlx::Error> {
    let storage = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(ScannedValue::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let value = match storage.as_str() {
        "INTEGER" | "BOOLEAN" => ScannedValue::Integer(row.try_get_unchecked(index)?),
        "REAL" => ScannedValue::Real(row.try_get_unchecked(index)?),
        "TEXT" => ScannedValue::Text(row.try_get_unchecked(index)?),
        _ => ScannedValue::Bytes(row.try_get_unchecked(index)?),
    };
    Ok(value)
}
