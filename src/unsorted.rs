use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::entry::TableEntry;
use crate::error::{StatusCode, TableResult};
use crate::iter::Iter;
use crate::storage::OrderedStorage;
use crate::table::Table;

/// A sequence table that keeps entries in insertion order.
///
/// Lookup is a linear scan; insertion appends at the end. Keys stay
/// unique, nothing else is promised about their arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsortedSequenceTable<K, V> {
    entries: OrderedStorage<TableEntry<K, V>>,
}

impl<K, V> UnsortedSequenceTable<K, V> {
    pub fn new() -> Self {
        UnsortedSequenceTable {
            entries: OrderedStorage::new(),
        }
    }
}

impl<K: Ord, V> UnsortedSequenceTable<K, V> {
    fn index_of_key<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.entries
            .as_slice()
            .iter()
            .position(|entry| entry.key().borrow() == key)
    }
}

impl<K: Ord, V> Table<K, V> for UnsortedSequenceTable<K, V> {
    fn insert(&mut self, key: K, value: V) -> TableResult<()> {
        if self.index_of_key(&key).is_some() {
            return err!(StatusCode::DuplicateKey, "table already contains this key");
        }
        self.entries
            .insert_at(self.entries.len(), TableEntry::new(key, value));
        Ok(())
    }

    fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.index_of_key(key).map(move |i| self.entries[i].value())
    }

    fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        match self.index_of_key(key) {
            Some(index) => Some(self.entries[index].value_mut()),
            None => None,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> Iter<K, V> {
        Iter::new(self.entries.as_slice())
    }
}

impl<K, V> Default for UnsortedSequenceTable<K, V> {
    fn default() -> Self {
        UnsortedSequenceTable::new()
    }
}

impl<K: Ord, V: Display> Display for UnsortedSequenceTable<K, V> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "[")?;
        for (i, (_, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}
