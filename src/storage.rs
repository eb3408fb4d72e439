use std::ops::{Index, IndexMut};

/// Contiguous backing sequence for the table variants.
///
/// Narrows `Vec` down to what the tables actually consume: indexed read,
/// insert-at-index (shifting later elements right) and a size query.
/// Growth stays `Vec`'s business.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedStorage<T> {
    items: Vec<T>,
}

impl<T> OrderedStorage<T> {
    pub fn new() -> Self {
        OrderedStorage { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OrderedStorage {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts `item` at `index`, shifting every later element up by one.
    ///
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for OrderedStorage<T> {
    fn default() -> Self {
        OrderedStorage::new()
    }
}

impl<T> Index<usize> for OrderedStorage<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for OrderedStorage<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}
