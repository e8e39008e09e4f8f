//! Ordered metadata map attached to tables, sheets and workbooks.
//!
//! [`Metadata`] is a thin wrapper around [`IndexMap`] from string keys to
//! arbitrary JSON values. Insertion order is kept so that generated
//! annotations and JSON projections are deterministic.
//!
//! Two keys have a fixed meaning:
//!
//! - `schema_used`: description of the schema that produced a parsed table
//! - `visual`: sidecar data read from (and written to) a metadata annotation
//!
//! ## Examples
//!
//! ```rust
//! use md_spreadsheet_parser::Metadata;
//! use serde_json::json;
//!
//! let mut map = Metadata::new();
//! map.insert("visual", json!({"columnWidths": [100, 80]}));
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.visual().and_then(|v| v.get("columnWidths")), Some(&json!([100, 80])));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Key under which sidecar annotation data is stored.
pub const VISUAL_KEY: &str = "visual";

/// Key under which the table parser records the schema it used.
pub const SCHEMA_USED_KEY: &str = "schema_used";

/// An ordered map of string keys to JSON values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, JsonValue>);

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Metadata(IndexMap::new())
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(key.into(), value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sidecar object stored under [`VISUAL_KEY`], if it is an object.
    #[must_use]
    pub fn visual(&self) -> Option<&Map<String, JsonValue>> {
        self.0.get(VISUAL_KEY).and_then(JsonValue::as_object)
    }

    /// Stores a sidecar object under [`VISUAL_KEY`].
    pub fn set_visual(&mut self, visual: Map<String, JsonValue>) {
        self.0.insert(VISUAL_KEY.to_string(), JsonValue::Object(visual));
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, JsonValue> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, JsonValue>> for Metadata {
    fn from(map: HashMap<String, JsonValue>) -> Self {
        Metadata(map.into_iter().collect())
    }
}

impl From<Map<String, JsonValue>> for Metadata {
    fn from(map: Map<String, JsonValue>) -> Self {
        Metadata(map.into_iter().collect())
    }
}

impl IntoIterator for Metadata {
    type Item = (String, JsonValue);
    type IntoIter = indexmap::map::IntoIter<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a JsonValue);
    type IntoIter = indexmap::map::Iter<'a, String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, JsonValue)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (String, JsonValue)>>(iter: T) -> Self {
        Metadata(IndexMap::from_iter(iter))
    }
}
