//! Sequence tables: associative containers over contiguous storage.
//!
//! The interesting variant is [`SortedSequenceTable`], which keeps its
//! entries in strictly ascending key order and looks keys up by
//! bisection; [`UnsortedSequenceTable`] shares the same [`Table`]
//! contract with a linear scan.

#[macro_use]
mod error;
mod entry;
mod storage;
mod iter;
mod table;
mod sorted;
mod unsorted;

pub use crate::entry::TableEntry;
pub use crate::error::{Status, StatusCode, TableResult};
pub use crate::iter::Iter;
pub use crate::sorted::SortedSequenceTable;
pub use crate::storage::OrderedStorage;
pub use crate::table::Table;
pub use crate::unsorted::UnsortedSequenceTable;
