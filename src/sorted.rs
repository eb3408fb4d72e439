use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entry::TableEntry;
use crate::error::{StatusCode, TableResult};
use crate::iter::Iter;
use crate::storage::OrderedStorage;
use crate::table::Table;

/// A sequence table kept in strictly ascending key order.
///
/// Lookup bisects the entry sequence over half-open `[start, end)` index
/// ranges; insertion places the new entry at the position the probe
/// reports, shifting later entries up by one. Two invariants hold after
/// every mutation: no two entries share a key, and keys are strictly
/// ascending by index. They are what makes the bisection correct.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSequenceTable<K, V> {
    entries: OrderedStorage<TableEntry<K, V>>,
}

impl<K, V> SortedSequenceTable<K, V> {
    pub fn new() -> Self {
        SortedSequenceTable {
            entries: OrderedStorage::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SortedSequenceTable {
            entries: OrderedStorage::with_capacity(capacity),
        }
    }
}

impl<K: Ord, V> SortedSequenceTable<K, V> {
    /// Bisects `[start, end)`, initially the full table, for `key`.
    ///
    /// Returns `Ok(index)` when an entry with the key exists and
    /// `Err(position)` with the position where such an entry would have
    /// to be placed to keep the keys sorted.
    ///
    /// Once the range has collapsed (`start == end`) the probed point
    /// itself decides the insertion side: before `middle` when the key
    /// sorts below it, after it otherwise. A range that degenerates at
    /// the table's end has nothing left to probe and reports `start`
    /// directly.
    fn index_of_key<Q: ?Sized>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        let mut start = 0;
        let mut end = self.entries.len();

        loop {
            if start == self.entries.len() {
                return Err(start);
            }

            // start <= middle < len here, so the probe is always in bounds.
            let middle = (start + end) / 2;
            let middle_key = self.entries[middle].key().borrow();

            if middle_key == key {
                return Ok(middle);
            }

            if start == end {
                return Err(if key < middle_key { middle } else { middle + 1 });
            }

            if middle_key < key {
                start = middle + 1;
            } else {
                end = middle;
            }
        }
    }
}

impl<K: Ord, V> Table<K, V> for SortedSequenceTable<K, V> {
    fn insert(&mut self, key: K, value: V) -> TableResult<()> {
        match self.index_of_key(&key) {
            Ok(_) => err!(StatusCode::DuplicateKey, "table already contains this key"),
            Err(position) => {
                self.entries.insert_at(position, TableEntry::new(key, value));
                Ok(())
            }
        }
    }

    fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        match self.index_of_key(key) {
            Ok(index) => Some(self.entries[index].value()),
            Err(_) => None,
        }
    }

    fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        match self.index_of_key(key) {
            Ok(index) => Some(self.entries[index].value_mut()),
            Err(_) => None,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> Iter<K, V> {
        Iter::new(self.entries.as_slice())
    }
}

impl<K, V> Default for SortedSequenceTable<K, V> {
    fn default() -> Self {
        SortedSequenceTable::new()
    }
}

impl<K: Ord, V: Display> Display for SortedSequenceTable<K, V> {
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

impl<K: Serialize, V: Serialize> Serialize for SortedSequenceTable<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.as_slice())
    }
}

// Replays every entry through `insert` so anything that deserializes
// satisfies the same invariants as a table built by hand; duplicate keys
// in the input are a data error.
impl<'de, K, V> Deserialize<'de> for SortedSequenceTable<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<TableEntry<K, V>>::deserialize(deserializer)?;
        let mut table = SortedSequenceTable::with_capacity(entries.len());
        for entry in entries {
            let (key, value) = entry.into_pair();
            table.insert(key, value).map_err(D::Error::custom)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod test {
    use rand::prelude::*;
    use std::collections::HashSet;

    use super::*;

    fn keys_of<K: Clone + Ord, V>(table: &SortedSequenceTable<K, V>) -> Vec<K> {
        table.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_insert_keeps_keys_sorted() {
        let mut table = SortedSequenceTable::new();
        table.insert(5, "five").unwrap();
        table.insert(3, "three").unwrap();
        table.insert(8, "eight").unwrap();
        assert_eq!(vec![3, 5, 8], keys_of(&table));
        assert_eq!(Some(&"five"), table.get(&5));
        assert_eq!(None, table.get(&9));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut table = SortedSequenceTable::new();
        table.insert(5, 50).unwrap();
        let status = table.insert(5, 51).unwrap_err();
        assert_eq!(StatusCode::DuplicateKey, status.code);
        assert_eq!(1, table.len());
        assert_eq!(Some(&50), table.get(&5));
    }

    #[test]
    fn test_duplicate_leaves_table_unchanged() {
        let mut table = SortedSequenceTable::new();
        for k in &[2, 4, 6, 8] {
            table.insert(*k, *k * 10).unwrap();
        }
        let before = table.clone();
        assert!(table.insert(6, 0).is_err());
        assert_eq!(before, table);
    }

    #[test]
    fn test_get_on_empty() {
        let table: SortedSequenceTable<i32, i32> = SortedSequenceTable::new();
        assert_eq!(None, table.get(&7));
        assert!(table.is_empty());
    }

    #[test]
    fn test_single_entry_probe() {
        let mut table = SortedSequenceTable::new();
        table.insert(5, ()).unwrap();
        assert!(table.contains_key(&5));
        assert!(!table.contains_key(&4));
        assert!(!table.contains_key(&6));
    }

    #[test]
    fn test_insertion_positions() {
        let mut table = SortedSequenceTable::new();
        table.insert(3, ()).unwrap();
        table.insert(5, ()).unwrap();
        table.insert(8, ()).unwrap();
        // below every key, between each pair, above every key
        table.insert(1, ()).unwrap();
        table.insert(4, ()).unwrap();
        table.insert(6, ()).unwrap();
        table.insert(9, ()).unwrap();
        assert_eq!(vec![1, 3, 4, 5, 6, 8, 9], keys_of(&table));
    }

    #[test]
    fn test_ascending_and_descending_runs() {
        let mut table = SortedSequenceTable::new();
        for k in (0..5).chain((5..10).rev()) {
            table.insert(k, k).unwrap();
        }
        assert_eq!((0..10).collect::<Vec<_>>(), keys_of(&table));
    }

    #[test]
    fn test_random() {
        let n = 1000;
        let mut rng = rand::thread_rng();
        let mut seen = HashSet::with_capacity(n);
        let mut kvs = Vec::with_capacity(n);
        for _ in 0..=n {
            let k = rng.gen_range(0..n * 10);
            if seen.contains(&k) {
                continue;
            }
            let v = rng.gen_range(0..n);
            kvs.push((k, v));
            seen.insert(k);
        }

        let mut table = SortedSequenceTable::new();
        for (k, v) in &kvs {
            table.insert(*k, *v).unwrap();
        }
        assert_eq!(kvs.len(), table.len());

        for (k, v) in &kvs {
            assert_eq!(Some(v), table.get(k));
        }
        for k in 0..n * 10 {
            if !seen.contains(&k) {
                assert_eq!(None, table.get(&k));
            }
        }

        let keys = keys_of(&table);
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut table = SortedSequenceTable::new();
        table.insert(1, 10).unwrap();
        table.insert(2, 20).unwrap();
        table.insert(3, 30).unwrap();

        let mut copied = table.clone();
        copied.insert(4, 40).unwrap();
        *copied.get_mut(&1).unwrap() = 11;

        assert_eq!(3, table.len());
        assert_eq!(4, copied.len());
        assert_eq!(Some(&10), table.get(&1));
        assert_eq!(Some(&11), copied.get(&1));
        assert_eq!(None, table.get(&4));
    }

    #[test]
    fn test_mutating_original_leaves_clone_alone() {
        let mut table = SortedSequenceTable::new();
        table.insert("a".to_owned(), 1).unwrap();
        let copied = table.clone();
        table.insert("b".to_owned(), 2).unwrap();
        assert_eq!(1, copied.len());
        assert!(!copied.contains_key("b"));
    }

    #[test]
    fn test_borrowed_key_lookup() {
        let mut table = SortedSequenceTable::new();
        table.insert("left".to_owned(), 1).unwrap();
        table.insert("right".to_owned(), 2).unwrap();
        assert_eq!(Some(&2), table.get("right"));
        assert!(table.contains_key("left"));
        assert_eq!(None, table.get("middle"));
    }

    #[test]
    fn test_to_string() {
        let mut table = SortedSequenceTable::new();
        table.insert(2, 20).unwrap();
        table.insert(1, 10).unwrap();
        table.insert(3, 30).unwrap();
        assert_eq!("[10, 20, 30]", table.to_string());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut table = SortedSequenceTable::new();
        for k in &[9, 1, 5] {
            table.insert(*k, format!("v{}", k)).unwrap();
        }
        let buf = bincode::serialize(&table).unwrap();
        let restored: SortedSequenceTable<i32, String> = bincode::deserialize(&buf).unwrap();
        assert_eq!(table, restored);
        assert_eq!(vec![1, 5, 9], keys_of(&restored));
    }

    #[test]
    fn test_deserialize_rejects_duplicate_keys() {
        let entries = vec![TableEntry::new(1, 10), TableEntry::new(1, 11)];
        let buf = bincode::serialize(&entries).unwrap();
        let restored: Result<SortedSequenceTable<i32, i32>, _> = bincode::deserialize(&buf);
        assert!(restored.is_err());
    }

    #[test]
    fn test_deserialize_sorts_unordered_input() {
        let entries = vec![TableEntry::new(3, 30), TableEntry::new(1, 10)];
        let buf = bincode::serialize(&entries).unwrap();
        let restored: SortedSequenceTable<i32, i32> = bincode::deserialize(&buf).unwrap();
        assert_eq!(vec![1, 3], keys_of(&restored));
    }
}
