//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use explorer_core::PrimaryKeyPolicy;
use tracing::Level;

/// Generic CRUD HTTP service over a SQLite database.
#[derive(Debug, Clone, Parser)]
#[command(name = "explorer-server")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:explorer.db")]
    pub database: String,

    /// Address the HTTP listener binds to.
    #[arg(short, long, env = "EXPLORER_LISTEN", default_value = "127.0.0.1:8082")]
    pub listen: SocketAddr,

    /// Maximum number of pooled database connections.
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Connection attempts before giving up at startup.
    #[arg(long, default_value_t = 10)]
    pub connect_retries: u32,

    /// Seconds to wait between connection attempts.
    #[arg(long, default_value_t = 5)]
    pub retry_delay_secs: u64,

    /// What to do with tables that lack a single-column primary key.
    #[arg(long, value_enum, default_value_t = MissingPrimaryKey::Reject)]
    pub on_missing_primary_key: MissingPrimaryKey,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Delay between startup connection attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Log level for the subscriber.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

/// Command-line spelling of [`PrimaryKeyPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissingPrimaryKey {
    /// Abort startup.
    Reject,
    /// Leave the table out of the schema.
    Skip,
}

impl From<MissingPrimaryKey> for PrimaryKeyPolicy {
    fn from(value: MissingPrimaryKey) -> Self {
        match value {
            MissingPrimaryKey::Reject => Self::Reject,
            MissingPrimaryKey::Skip => Self::Skip,
        }
    }
}
