//! Record service: per-request orchestration over the discovered schema.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dialect::Dialect;
use crate::error::{Result, ServiceError, ValidationError};
use crate::extract::{extract, Record};
use crate::query;
use crate::schema::{Schema, Table};
use crate::store::RecordStore;
use crate::validation::{validate_for_create, validate_for_update};

/// Default number of records per page.
pub const DEFAULT_LIMIT: u32 = 5;
/// Default number of records to skip.
pub const DEFAULT_OFFSET: u32 = 0;

/// Paging window for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of records.
    pub limit: u32,
    /// Records to skip.
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Page {
    /// Creates a paging window.
    #[must_use]
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Builds a window from raw query-string values.
    ///
    /// Absent, non-numeric or negative values fall back to the defaults.
    #[must_use]
    pub fn from_params(limit: Option<&str>, offset: Option<&str>) -> Self {
        let parse = |raw: Option<&str>, default: u32| {
            raw.and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(default)
        };
        Self {
            limit: parse(limit, DEFAULT_LIMIT),
            offset: parse(offset, DEFAULT_OFFSET),
        }
    }
}

/// Generic CRUD over every table of a [`Schema`].
pub struct RecordService {
    schema: Arc<Schema>,
    store: Arc<dyn RecordStore>,
    dialect: Arc<dyn Dialect>,
}

impl RecordService {
    /// Creates a service.
    #[must_use]
    pub const fn new(schema: Arc<Schema>, store: Arc<dyn RecordStore>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            schema,
            store,
            dialect,
        }
    }

    /// Returns the discovered schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn table(&self, name: &str) -> Result<&Table> {
        self.schema.get(name).ok_or_else(|| {
            debug!(table = %name, "unknown table");
            ServiceError::TableNotFound
        })
    }

    /// Lists table names in sorted order.
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.schema.table_names()
    }

    /// Lists one page of records, with null fields left out.
    ///
    /// # Errors
    ///
    /// [`ServiceError::TableNotFound`] for a table outside the schema, or a
    /// store/extraction failure.
    pub async fn list(&self, table: &str, page: Page) -> Result<Vec<Record>> {
        let table = self.table(table)?;
        let (sql, params) = query::build_select(self.dialect.as_ref(), table, page.limit, page.offset);
        debug!(table = %table.name(), limit = page.limit, offset = page.offset, %sql, "listing records");

        let rows = self.store.fetch_all(&sql, &params).await?;
        rows.into_iter()
            .map(|row| -> Result<Record> { Ok(extract(table, row)?.strip_nulls()) })
            .collect()
    }

    /// Fetches one record by primary key, with null fields left out.
    ///
    /// # Errors
    ///
    /// [`ServiceError::RecordNotFound`] when no row has that key, besides the
    /// failures of [`RecordService::list`].
    pub async fn get(&self, table: &str, id: i64) -> Result<Record> {
        let table = self.table(table)?;
        let (sql, params) = query::build_select_by_id(self.dialect.as_ref(), table, id);
        debug!(table = %table.name(), id, %sql, "fetching record");

        let row = self
            .store
            .fetch_optional(&sql, &params)
            .await?
            .ok_or(ServiceError::RecordNotFound)?;
        Ok(extract(table, row)?.strip_nulls())
    }

    /// Inserts a record and returns its id.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Validation`] when the fields do not fit the table,
    /// besides an unknown table or a store failure.
    pub async fn create<S: BuildHasher>(
        &self,
        table: &str,
        raw: &HashMap<String, String, S>,
    ) -> Result<i64> {
        let table = self.table(table)?;
        let data = validate_for_create(table, raw).inspect_err(|e| {
            debug!(table = %table.name(), error = %e, "rejected create");
        })?;
        let (sql, params) = query::build_insert(self.dialect.as_ref(), table, &data);

        let outcome = self.store.execute(&sql, &params).await?;
        info!(table = %table.name(), id = outcome.last_insert_id, "inserted record");
        Ok(outcome.last_insert_id)
    }

    /// Updates the given fields of a record.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Validation`] for unusable fields and
    /// [`ServiceError::RecordNotFound`] when no row has that key, besides an
    /// unknown table or a store failure.
    pub async fn update<S: BuildHasher>(
        &self,
        table: &str,
        id: i64,
        raw: &HashMap<String, String, S>,
    ) -> Result<()> {
        let table = self.table(table)?;
        let data = validate_for_update(table, raw).inspect_err(|e| {
            debug!(table = %table.name(), id, error = %e, "rejected update");
        })?;
        let (sql, params) = query::build_update(self.dialect.as_ref(), table, id, &data)
            .ok_or(ValidationError::MissingUpdateData)?;

        let outcome = self.store.execute(&sql, &params).await?;
        if outcome.rows_affected == 0 {
            warn!(table = %table.name(), id, "update matched no record");
            return Err(ServiceError::RecordNotFound);
        }
        info!(table = %table.name(), id, fields = data.len(), "updated record");
        Ok(())
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// [`ServiceError::RecordNotFound`] when no row has that key, besides an
    /// unknown table or a store failure.
    pub async fn delete(&self, table: &str, id: i64) -> Result<()> {
        let table = self.table(table)?;
        let (sql, params) = query::build_delete(self.dialect.as_ref(), table, id);

        let outcome = self.store.execute(&sql, &params).await?;
        if outcome.rows_affected == 0 {
            warn!(table = %table.name(), id, "delete matched no record");
            return Err(ServiceError::RecordNotFound);
        }
        info!(table = %table.name(), id, "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        assert_eq!(Page::default(), Page::new(5, 0));
        assert_eq!(Page::from_params(None, None), Page::new(5, 0));
    }

    #[test]
    fn test_page_from_params() {
        assert_eq!(Page::from_params(Some("2"), Some("1")), Page::new(2, 1));
        assert_eq!(Page::from_params(Some("abc"), Some("-3")), Page::new(5, 0));
        assert_eq!(Page::from_params(Some(""), Some("7")), Page::new(5, 7));
    }
}
