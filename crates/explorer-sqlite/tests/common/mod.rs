#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use explorer_core::{PrimaryKeyPolicy, RecordService, SchemaDiscoverer};
use explorer_sqlite::{SqliteCatalog, SqliteDialect, SqliteStore};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const ITEMS: &str = "CREATE TABLE items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(64) NOT NULL,
    price DECIMAL(10,2),
    qty INT,
    active BOOLEAN,
    note TEXT
)";

/// Single-connection in-memory database; the connection is never recycled
/// so the database lives as long as the pool.
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

pub async fn exec(pool: &SqlitePool, sql: &str) {
    sqlx::query(sql).execute(pool).await.unwrap();
}

pub async fn items_pool() -> SqlitePool {
    let pool = memory_pool().await;
    exec(&pool, ITEMS).await;
    pool
}

pub async fn service(pool: &SqlitePool) -> RecordService {
    let schema = SchemaDiscoverer::new(&SqliteCatalog::new(pool.clone()))
        .with_policy(PrimaryKeyPolicy::Skip)
        .discover()
        .await
        .unwrap();
    RecordService::new(
        Arc::new(schema),
        Arc::new(SqliteStore::new(pool.clone())),
        Arc::new(SqliteDialect::new()),
    )
}

pub fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
