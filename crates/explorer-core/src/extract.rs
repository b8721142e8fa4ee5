//! Conversion of scanned rows into typed records.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::builder::SqlValue;
use crate::error::ExtractionError;
use crate::schema::{ColumnType, Table};
use crate::validation::parse_float;

/// A single cell as returned by the database driver, before the column's
/// semantic type is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ScannedValue {
    /// SQL NULL.
    Null,
    /// Integer storage.
    Integer(i64),
    /// Floating point storage.
    Real(f64),
    /// Text storage.
    Text(String),
    /// Raw bytes; some drivers hand back decimals this way.
    Bytes(Vec<u8>),
}

/// Column name to value pairs in table column order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, SqlValue)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.fields.push((column.into(), value));
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the record has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, SqlValue)> {
        self.fields.iter()
    }

    /// Returns the field names in order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the field values in order.
    #[must_use]
    pub fn values(&self) -> Vec<SqlValue> {
        self.fields.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Drops every null-valued field.
    #[must_use]
    pub fn strip_nulls(mut self) -> Self {
        self.fields.retain(|(_, value)| !value.is_null());
        self
    }
}

impl IntoIterator for Record {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a (String, SqlValue);
    type IntoIter = std::slice::Iter<'a, (String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, SqlValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Maps one scanned row onto the table's columns.
#[allow(clippy::cast_precision_loss)]
pub fn extract(table: &Table, row: Vec<ScannedValue>) -> Result<Record, ExtractionError> {
    let columns = table.columns();
    if row.len() != columns.len() {
        return Err(ExtractionError::RowWidth {
            table: table.name().to_string(),
            expected: columns.len(),
            actual: row.len(),
        });
    }

    columns
        .iter()
        .zip(row)
        .map(|(column, scanned)| -> Result<(String, SqlValue), ExtractionError> {
            let value = match (scanned, column.column_type) {
                (ScannedValue::Null, _) => SqlValue::Null,
                (ScannedValue::Bytes(bytes), ColumnType::Float) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let parsed = parse_float(text.trim()).ok_or_else(|| {
                        ExtractionError::InvalidFloat {
                            column: column.name.clone(),
                            value: text.to_string(),
                        }
                    })?;
                    SqlValue::Float(parsed)
                }
                (ScannedValue::Bytes(bytes), _) => {
                    SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned())
                }
                (ScannedValue::Integer(v), ColumnType::Float) => SqlValue::Float(v as f64),
                (ScannedValue::Integer(v), ColumnType::Boolean) => SqlValue::Bool(v != 0),
                (ScannedValue::Integer(v), _) => SqlValue::Int(v),
                (ScannedValue::Real(v), _) => SqlValue::Float(v),
                (ScannedValue::Text(s), _) => SqlValue::Text(s),
            };
            Ok((column.name.clone(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn items() -> Table {
        Table::new(
            "items",
            vec![
                Column::new("id", ColumnType::Integer).not_null().primary_key(),
                Column::new("name", ColumnType::String).not_null(),
                Column::new("price", ColumnType::Float),
                Column::new("active", ColumnType::Boolean),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_extract_decodes_byte_floats() {
        let record = extract(
            &items(),
            vec![
                ScannedValue::Integer(1),
                ScannedValue::Bytes(b"Widget".to_vec()),
                ScannedValue::Bytes(b"9.50".to_vec()),
                ScannedValue::Integer(1),
            ],
        )
        .unwrap();

        assert_eq!(record.get("id"), Some(&SqlValue::Int(1)));
        assert_eq!(record.get("name"), Some(&SqlValue::Text("Widget".into())));
        assert_eq!(record.get("price"), Some(&SqlValue::Float(9.5)));
        assert_eq!(record.get("active"), Some(&SqlValue::Bool(true)));
    }

    #[test]
    fn test_extract_widens_integral_floats() {
        let record = extract(
            &items(),
            vec![
                ScannedValue::Integer(2),
                ScannedValue::Text("Gadget".into()),
                ScannedValue::Integer(10),
                ScannedValue::Integer(0),
            ],
        )
        .unwrap();

        assert_eq!(record.get("price"), Some(&SqlValue::Float(10.0)));
        assert_eq!(record.get("active"), Some(&SqlValue::Bool(false)));
    }

    #[test]
    fn test_extract_rejects_bad_float_bytes() {
        let err = extract(
            &items(),
            vec![
                ScannedValue::Integer(1),
                ScannedValue::Text("x".into()),
                ScannedValue::Bytes(b"ten".to_vec()),
                ScannedValue::Null,
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidFloat { ref column, .. } if column == "price"));

        let err = extract(
            &items(),
            vec![
                ScannedValue::Integer(1),
                ScannedValue::Text("x".into()),
                ScannedValue::Bytes(b"inf".to_vec()),
                ScannedValue::Null,
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidFloat { ref value, .. } if value == "inf"));
    }

    #[test]
    fn test_extract_rejects_width_mismatch() {
        let err = extract(&items(), vec![ScannedValue::Integer(1)]).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::RowWidth {
                table: "items".into(),
                expected: 4,
                actual: 1
            }
        );
    }

    #[test]
    fn test_strip_nulls_and_serialize_in_column_order() {
        let record = extract(
            &items(),
            vec![
                ScannedValue::Integer(3),
                ScannedValue::Text("Bolt".into()),
                ScannedValue::Null,
                ScannedValue::Null,
            ],
        )
        .unwrap()
        .strip_nulls();

        assert_eq!(record.columns(), vec!["id", "name"]);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":3,"name":"Bolt"}"#
        );
    }
}
