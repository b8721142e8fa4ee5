//! Pool connection with startup retry.

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Opens a pool, retrying while the database is unreachable.
///
/// Makes at most `attempts` attempts (at least one), sleeping `delay`
/// between them.
///
/// # Errors
///
/// The last connection error, once attempts run out.
pub async fn connect_with_retry(
    options: SqlitePoolOptions,
    url: &str,
    attempts: u32,
    delay: Duration,
) -> Result<SqlitePool, sqlx::Error> {
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match options.clone().connect(url).await {
            Ok(pool) => {
                info!(attempt, "connected to database");
                return Ok(pool);
            }
            Err(e) if attempt < attempts => {
                warn!(attempt, attempts, error = %e, "database unreachable, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connects_first_try() {
        let pool = connect_with_retry(
            SqlitePoolOptions::new().max_connections(1),
            "sqlite::memory:",
            3,
            Duration::from_millis(10),
        )
        .await
        .unwrap();
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_attempts() {
        let started = std::time::Instant::now();
        let result = connect_with_retry(
            SqlitePoolOptions::new().max_connections(1),
            "sqlite:///nonexistent-dir/sub/none.db",
            3,
            Duration::from_millis(20),
        )
        .await;

        assert!(result.is_err());
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
