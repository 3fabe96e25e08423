//! Row records consumed by the grid.
//!
//! A [`Row`] is an opaque mapping from column key to [`Value`]. Rows are
//! owned by the host: the grid reads them, but never mutates one in
//! place. Cell edits leave the grid as `(row_index, column_key, value)`
//! commits and the host is responsible for producing a new row set.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The identity field assumed when the host does not configure one.
pub const DEFAULT_ID_KEY: &str = "id";

/// One data record displayed as a table line.
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::row::Row;
/// use datagrid_widgets::value::Value;
///
/// let row = Row::new()
///     .with("id", 1)
///     .with("city", "Lisbon")
///     .with("population", 545_000);
///
/// assert_eq!(row.get("city"), Some(&Value::from("Lisbon")));
/// assert_eq!(row.value_string("missing"), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a single field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the value under `key` coerced to a string.
    ///
    /// Missing fields and explicit nulls both coerce to the empty string;
    /// lookups never fail.
    pub fn value_string(&self, key: &str) -> String {
        self.values
            .get(key)
            .map(Value::coerce_string)
            .unwrap_or_default()
    }

    /// Returns the row's identity value under the given identity key.
    pub fn identity(&self, id_key: &str) -> Option<&Value> {
        self.values.get(id_key)
    }

    /// Iterates over the row's fields in arbitrary order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields present on the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
