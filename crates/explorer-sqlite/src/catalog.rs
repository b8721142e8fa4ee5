//! Schema metadata from SQLite's system tables.

use explorer_core::{Catalog, ColumnInfo, StoreError};
use futures::future::BoxFuture;
use sqlx::SqlitePool;

use crate::store_error;

const TABLES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     ORDER BY name";

const COLUMNS: &str = "SELECT name, type, \"notnull\" FROM pragma_table_info(?1) ORDER BY cid";

const PRIMARY_KEY: &str = "SELECT name FROM pragma_table_info(?1) WHERE pk > 0 ORDER BY pk";

/// [`Catalog`] over a SQLite connection pool.
///
/// The table name is always a bound argument of `pragma_table_info`, never
/// part of the SQL text.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Creates a catalog reading through `pool`.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Catalog for SqliteCatalog {
    fn table_names(&self) -> BoxFuture<'_, Result<Vec<String>, StoreError>> {
        Box::pin(async move {
            sqlx::query_scalar::<_, String>(TABLES)
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)
        })
    }

    fn columns<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ColumnInfo>, StoreError>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, (String, String, i64)>(COLUMNS)
                .bind(table)
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;

            Ok(rows
                .into_iter()
                .map(|(name, type_name, not_null)| ColumnInfo::new(name, type_name, Some(not_null == 0)))
                .collect())
        })
    }

    fn primary_key<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<String>, StoreError>> {
        Box::pin(async move {
            sqlx::query_scalar::<_, String>(PRIMARY_KEY)
                .bind(table)
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)
        })
    }
}
