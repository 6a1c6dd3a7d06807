//! Tabular store abstraction
use std::collections::BTreeMap;

use crate::table::Table;

/// [Store] is a persistent (or not) key / [Table] storage.
/// Batch operations are handed an already opened [Store],
/// and access it exclusively for their entire duration.
pub trait Store {
    /// Returns true if `name` exists in this [Store]
    fn contains(&self, name: &str) -> bool;
    /// Reads `name` from this [Store]
    fn get(&self, name: &str) -> Option<Table>;
    /// Writes (or overwrites) `name` in this [Store]
    fn insert(&mut self, name: &str, table: Table);
    /// Lists all [Table] names
    fn keys(&self) -> Vec<String>;
}

/// In memory [Store]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    tables: BTreeMap<String, Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies and returns [Self] with given [Table]
    pub fn with_table<T: Into<Table>>(mut self, name: &str, table: T) -> Self {
        self.tables.insert(name.to_string(), table.into());
        self
    }

    /// Borrows a [Table] without copying it
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Store for MemoryStore {
    fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
    fn get(&self, name: &str) -> Option<Table> {
        self.tables.get(name).cloned()
    }
    fn insert(&mut self, name: &str, table: Table) {
        self.tables.insert(name.to_string(), table);
    }
    fn keys(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::table::Frame;
    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new().with_table("a", Frame::ordinal(2));
        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        store.insert("b", Table::Frame(Frame::ordinal(1)));
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.get("b").and_then(|t| t.as_frame().map(|f| f.len())), Some(1));
    }
}
