//! HTTP front end for a discovered SQLite schema.
//!
//! Startup discovers every table once, then serves generic CRUD endpoints
//! over them:
//!
//! | Method | Path            | Action                 |
//! |--------|-----------------|------------------------|
//! | GET    | `/`             | list table names       |
//! | GET    | `/{table}`      | list records (paged)   |
//! | PUT    | `/{table}`      | create a record        |
//! | GET    | `/{table}/{id}` | fetch a record         |
//! | POST   | `/{table}/{id}` | partially update       |
//! | DELETE | `/{table}/{id}` | delete a record        |

pub mod config;
pub mod handlers;
pub mod http;
pub mod routes;

use std::sync::Arc;

use explorer_core::{DiscoveryError, PrimaryKeyPolicy, RecordService, SchemaDiscoverer};
use explorer_sqlite::{SqliteCatalog, SqliteDialect, SqliteStore};
use sqlx::SqlitePool;

pub use config::Cli;
pub use routes::build_router;

/// Discovers the schema behind `pool` and wires a record service over it.
///
/// # Errors
///
/// Any [`DiscoveryError`] raised while reading the schema.
pub async fn build_service(
    pool: SqlitePool,
    policy: PrimaryKeyPolicy,
) -> Result<RecordService, DiscoveryError> {
    let catalog = SqliteCatalog::new(pool.clone());
    let schema = SchemaDiscoverer::new(&catalog)
        .with_policy(policy)
        .discover()
        .await?;

    Ok(RecordService::new(
        Arc::new(schema),
        Arc::new(SqliteStore::new(pool)),
        Arc::new(SqliteDialect::new()),
    ))
}
