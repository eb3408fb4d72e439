use std::borrow::Borrow;

use crate::error::TableResult;
use crate::iter::Iter;

/// Contract shared by the sequence table variants.
///
/// Every variant maps unique keys to values; they differ only in how they
/// arrange entries in their backing storage and therefore in how they
/// search. Lookups take any borrowed form of the key, as the stdlib maps
/// do.
pub trait Table<K: Ord, V> {
    /// Inserts `key` with `value`.
    ///
    /// Fails with a `DuplicateKey` status if the table already contains
    /// the key; the table is left unchanged in that case.
    fn insert(&mut self, key: K, value: V) -> TableResult<()>;

    fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord;

    fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.get(key).is_some()
    }

    /// Iterates over `(key, value)` pairs in storage order.
    fn iter(&self) -> Iter<K, V>;
}
