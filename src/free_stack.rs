use crate::Index;
use parking_lot::Mutex;

/// A LIFO stack of recycled indexes, shared between threads.
///
/// Handing out the most recently freed index first keeps live indexes packed
/// toward zero, so facet bitmaps grow as little as possible under churn.
#[derive(Debug, Default)]
pub struct IndexAllocator {
    freed: Mutex<Vec<Index>>,
}

impl IndexAllocator {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&self, index: Index) {
        self.freed.lock().push(index);
    }
    /// `None` when no index has been recycled; the caller allocates a fresh one.
    pub fn pop(&self) -> Option<Index> {
        self.freed.lock().pop()
    }
    pub fn is_empty(&self) -> bool {
        self.freed.lock().is_empty()
    }
    pub fn len(&self) -> usize {
        self.freed.lock().len()
    }
}
