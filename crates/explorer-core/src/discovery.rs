//! Schema discovery.
//!
//! [`SchemaDiscoverer`] walks a [`Catalog`] (the driver's view of the system
//! tables) and assembles an immutable [`Schema`]. Any catalog failure aborts
//! discovery; a schema is either complete or not produced at all.

use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use crate::error::{DiscoveryError, StoreError};
use crate::schema::{Column, ColumnType, Schema, Table};

/// Column metadata as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Native type name, e.g. `VARCHAR(64)`. May be empty.
    pub type_name: String,
    /// Whether the column accepts NULL, `None` when the driver cannot tell.
    pub nullable: Option<bool>,
}

impl ColumnInfo {
    /// Creates column metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, nullable: Option<bool>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable,
        }
    }
}

/// Read-only access to a database's table and column metadata.
pub trait Catalog: Send + Sync {
    /// Lists user table names.
    fn table_names(&self) -> BoxFuture<'_, Result<Vec<String>, StoreError>>;

    /// Lists the columns of a table in declaration order.
    fn columns<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ColumnInfo>, StoreError>>;

    /// Lists the primary-key column names of a table in key order.
    fn primary_key<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<String>, StoreError>>;
}

/// What to do with a table whose primary key is not exactly one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimaryKeyPolicy {
    /// Abort discovery.
    #[default]
    Reject,
    /// Leave the table out of the schema and log a warning.
    Skip,
}

/// Builds a [`Schema`] from a [`Catalog`].
pub struct SchemaDiscoverer<'c, C: ?Sized> {
    catalog: &'c C,
    policy: PrimaryKeyPolicy,
}

impl<'c, C: Catalog + ?Sized> SchemaDiscoverer<'c, C> {
    /// Creates a discoverer that rejects unsupported primary keys.
    #[must_use]
    pub const fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            policy: PrimaryKeyPolicy::Reject,
        }
    }

    /// Sets the primary-key policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: PrimaryKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Introspects every table.
    ///
    /// # Errors
    ///
    /// Fails on the first catalog error or invalid table definition. Tables
    /// without a single-column primary key are skipped instead when the
    /// policy is [`PrimaryKeyPolicy::Skip`].
    pub async fn discover(&self) -> Result<Schema, DiscoveryError> {
        let names = self
            .catalog
            .table_names()
            .await
            .map_err(DiscoveryError::ListTables)?;

        let mut schema = Schema::new();
        for name in names {
            match self.discover_table(&name).await {
                Ok(table) => {
                    info!(table = %name, columns = table.columns().len(), "discovered table");
                    schema.insert(table);
                }
                Err(DiscoveryError::UnsupportedPrimaryKey { table, found })
                    if self.policy == PrimaryKeyPolicy::Skip =>
                {
                    warn!(
                        table = %table,
                        primary_key_columns = found,
                        "skipping table without a single-column primary key"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(schema)
    }

    async fn discover_table(&self, name: &str) -> Result<Table, DiscoveryError> {
        let infos = self
            .catalog
            .columns(name)
            .await
            .map_err(|source| DiscoveryError::Columns {
                table: name.to_string(),
                source,
            })?;

        let keys = self
            .catalog
            .primary_key(name)
            .await
            .map_err(|source| DiscoveryError::PrimaryKey {
                table: name.to_string(),
                source,
            })?;

        let [primary_key] = keys.as_slice() else {
            return Err(DiscoveryError::UnsupportedPrimaryKey {
                table: name.to_string(),
                found: keys.len(),
            });
        };

        let mut columns = Vec::with_capacity(infos.len());
        for info in infos {
            let nullable = info
                .nullable
                .ok_or_else(|| DiscoveryError::IndeterminateNullability {
                    table: name.to_string(),
                    column: info.name.clone(),
                })?;

            let column_type = ColumnType::infer(&info.type_name);
            debug!(
                table = %name,
                column = %info.name,
                native = %info.type_name,
                inferred = %column_type,
                nullable,
                "discovered column"
            );

            let mut column = Column::new(info.name, column_type);
            column.nullable = nullable;
            column.is_primary_key = column.name == *primary_key;
            columns.push(column);
        }

        Table::new(name, columns)
    }
}
