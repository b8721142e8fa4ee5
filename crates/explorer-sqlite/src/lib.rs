//! # explorer-sqlite
//!
//! SQLite backend for `explorer-core`, built on `sqlx`.
//!
//! - [`SqliteCatalog`] reads table and column metadata from `sqlite_master`
//!   and `pragma_table_info`.
//! - [`SqliteStore`] executes the statements built by `explorer-core` and
//!   decodes rows by storage class.
//! - [`SqliteDialect`] quotes identifiers the SQLite way.
//! - [`connect_with_retry`] opens the pool at startup.
//!
//! # How SQLite differs from other backends
//!
//! - **[Type affinity]**: any column can hold any storage class. A `DECIMAL`
//!   column stores `10.0` as the integer `10`, and a `BOOLEAN` column stores
//!   integers. The extractor in `explorer-core` maps those back using the
//!   column's inferred type.
//! - **Nullability**: `pragma_table_info` always reports it, so discovery on
//!   SQLite never hits an indeterminate column.
//!
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use explorer_core::{RecordService, SchemaDiscoverer};
//! use explorer_sqlite::{SqliteCatalog, SqliteDialect, SqliteStore};
//! use sqlx::SqlitePool;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = SqlitePool::connect("sqlite:explorer.db").await?;
//! let schema = SchemaDiscoverer::new(&SqliteCatalog::new(pool.clone()))
//!     .discover()
//!     .await?;
//! let service = RecordService::new(
//!     Arc::new(schema),
//!     Arc::new(SqliteStore::new(pool)),
//!     Arc::new(SqliteDialect::new()),
//! );
//! # Ok(())
//! # }
//! ```

mod catalog;
mod dialect;
mod pool;
mod store;

pub use catalog::SqliteCatalog;
pub use dialect::SqliteDialect;
pub use pool::connect_with_retry;
pub use store::SqliteStore;

use explorer_core::StoreError;

pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    StoreError::backend(err)
}
