//! Runtime schema model.
//!
//! Tables are discovered at startup, so they are plain data rather than Rust
//! types: every column carries a [`ColumnType`] tag and all type-dependent
//! behavior is a `match` over that tag.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::DiscoveryError;

/// Semantic type of a column, inferred from the engine's native type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Whole numbers.
    Integer,
    /// Floating point and fixed point numbers.
    Float,
    /// Character data.
    String,
    /// Booleans.
    Boolean,
    /// Anything else; handled as opaque text.
    Unknown,
}

impl ColumnType {
    /// Infers the semantic type from a native type name such as
    /// `VARCHAR(255)` or `unsigned big int`.
    ///
    /// Matching is case-insensitive and by substring. The first matching
    /// family wins, so `INTERVAL` is an integer and `POINT` is not.
    #[must_use]
    pub fn infer(native: &str) -> Self {
        let upper = native.to_ascii_uppercase();
        let has = |needle: &str| upper.contains(needle);

        if has("INT") {
            Self::Integer
        } else if has("FLOAT") || has("DECIMAL") || has("DOUBLE") || has("REAL") || has("NUMERIC")
        {
            Self::Float
        } else if has("BOOL") {
            Self::Boolean
        } else if has("TEXT") || has("CHAR") || has("CLOB") {
            Self::String
        } else {
            Self::Unknown
        }
    }

    /// Returns the lowercase name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "bool",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Semantic type.
    pub column_type: ColumnType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether this is the table's primary key.
    pub is_primary_key: bool,
}

impl Column {
    /// Creates a nullable, non-key column.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
            is_primary_key: false,
        }
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as nullable (default).
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}

/// A discovered table with exactly one primary-key column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    primary_key: usize,
}

impl Table {
    /// Creates a table definition.
    ///
    /// # Errors
    ///
    /// Fails unless exactly one column is flagged as primary key and column
    /// names are unique.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, DiscoveryError> {
        let name = name.into();

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(DiscoveryError::InvalidTable {
                    table: name,
                    reason: format!("duplicate column '{}'", column.name),
                });
            }
        }

        let keys: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_primary_key)
            .map(|(i, _)| i)
            .collect();

        match keys.as_slice() {
            [primary_key] => Ok(Self {
                primary_key: *primary_key,
                name,
                columns,
            }),
            _ => Err(DiscoveryError::UnsupportedPrimaryKey {
                table: name,
                found: keys.len(),
            }),
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the primary-key column.
    #[must_use]
    pub fn primary_key(&self) -> &Column {
        &self.columns[self.primary_key]
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// All discovered tables, keyed by name.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    tables: BTreeMap<String, Table>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any previous table of the same name.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Returns the table names in sorted order.
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Iterates over tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Returns the number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns whether the schema has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<Table> for Schema {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut schema = Self::new();
        for table in iter {
            schema.insert(table);
        }
        schema
    }
}
