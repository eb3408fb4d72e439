use std::slice;

use crate::entry::TableEntry;

/// Borrowed iteration over a table's entries in storage order, which for
/// the sorted variant is ascending key order.
pub struct Iter<'a, K, V>(slice::Iter<'a, TableEntry<K, V>>);

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(entries: &'a [TableEntry<K, V>]) -> Self {
        Iter(entries.iter())
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|entry| (entry.key(), entry.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
