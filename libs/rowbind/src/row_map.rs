use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// One result row keyed by column name.
///
/// Keys keep the order in which columns first appear. Inserting an existing
/// key overwrites its value in place, so with duplicate column names the
/// later column's value wins. Lookups and inserts go through a name index,
/// so assembling a wide row stays linear in its column count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMap {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl RowMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Zip column names with a row's values.
    ///
    /// Values past the last column name are dropped; columns without a value
    /// are absent.
    pub fn from_row(columns: &[String], values: Vec<Value>) -> Self {
        let mut row = Self::with_capacity(values.len());
        for (name, value) in columns.iter().zip(values) {
            row.insert(name.clone(), value);
        }
        row
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RowMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = RowMap::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for RowMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
