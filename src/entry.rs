use serde::{Deserialize, Serialize};

/// A single key/value pair owned by a table.
///
/// The key is fixed for the lifetime of the entry; only the value can be
/// touched after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry<K, V> {
    key: K,
    value: V,
}

impl<K, V> TableEntry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        TableEntry { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
