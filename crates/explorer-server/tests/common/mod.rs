#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use explorer_core::PrimaryKeyPolicy;
use explorer_router::{Request, Response, Router};
use explorer_server::{build_router, build_service};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const ITEMS: &str = "CREATE TABLE items (
    id INTEGER PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    updated TEXT,
    rating REAL
)";

pub const USERS: &str = "CREATE TABLE users (
    user_id INTEGER PRIMARY KEY,
    login VARCHAR(255) NOT NULL,
    status INT NOT NULL DEFAULT 0
)";

pub struct App {
    pub pool: SqlitePool,
    pub router: Router,
}

impl App {
    pub async fn send(&self, req: Request) -> Response {
        self.router.handle(req).await
    }

    pub async fn json(&self, req: Request) -> (u16, serde_json::Value) {
        let res = self.send(req).await;
        let body = serde_json::from_slice(&res.body).unwrap();
        (res.status, body)
    }

    pub async fn text(&self, req: Request) -> (u16, String) {
        let res = self.send(req).await;
        (res.status, res.body_string().unwrap())
    }
}

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

/// App over the `items` and `users` tables, with three seeded items.
pub async fn app() -> App {
    let pool = memory_pool().await;
    for sql in [
        ITEMS,
        USERS,
        "INSERT INTO items (title, description, updated) VALUES ('database/sql', 'Go package', 'rvasily')",
        "INSERT INTO items (title, description) VALUES ('memcache', 'cache client')",
        "INSERT INTO items (title, description, rating) VALUES ('redis', 'key-value store', 4.5)",
    ] {
        sqlx::query(sql).execute(&pool).await.unwrap();
    }

    let service = build_service(pool.clone(), PrimaryKeyPolicy::Reject)
        .await
        .unwrap();
    let router = build_router(Arc::new(service)).unwrap();
    App { pool, router }
}
