//! # explorer-core
//!
//! Schema discovery and schema-driven CRUD without per-table code.
//!
//! This crate provides:
//! - Type inference from native column type names ([`ColumnType::infer`])
//! - Schema discovery over a driver-provided [`Catalog`]
//! - Coercion of untyped form input into typed values, with primary-key and
//!   NOT NULL protection
//! - Parameterized statement construction on top of typestate builders
//! - Conversion of scanned rows into JSON-ready [`Record`]s
//! - A [`RecordService`] tying it together over a driver-provided [`RecordStore`]
//!
//! ## SQL Injection Prevention
//!
//! Only identifiers from the discovered schema ever reach SQL text, quoted by
//! the dialect. Client values are always bound:
//!
//! ```rust
//! use explorer_core::dialect::GenericDialect;
//! use explorer_core::query::build_delete;
//! use explorer_core::schema::{Column, ColumnType, Table};
//!
//! let items = Table::new(
//!     "items",
//!     vec![Column::new("id", ColumnType::Integer).primary_key()],
//! )
//! .unwrap();
//!
//! let (sql, params) = build_delete(&GenericDialect, &items, 7);
//! assert_eq!(sql, r#"DELETE FROM "items" WHERE "id" = ?"#);
//! assert_eq!(params.len(), 1);
//! ```

pub mod builder;
pub mod dialect;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod query;
pub mod schema;
pub mod service;
pub mod store;
pub mod validation;

pub use builder::{SqlValue, ToSqlValue};
pub use discovery::{Catalog, ColumnInfo, PrimaryKeyPolicy, SchemaDiscoverer};
pub use error::{DiscoveryError, ExtractionError, ServiceError, StoreError, ValidationError};
pub use extract::{Record, ScannedValue};
pub use schema::{Column, ColumnType, Schema, Table};
pub use service::{Page, RecordService};
pub use store::{ExecOutcome, RecordStore};
