use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Append-only arena holding the builder's branches.
///
/// Branches are never removed: splitting a branch rewrites it in place and appends the new
/// node and leaf, so an [`ArenaIndex`] stays valid for the lifetime of the arena.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    items: Vec<T>,
}

impl<T> Arena<T> {
    /// Creates a new arena with the specified initial capacity.
    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    /// Pushes an item into the arena and returns a handle to it.
    #[inline]
    pub(crate) fn push(&mut self, item: T) -> ArenaIndex {
        let index = self.items.len();
        self.items.push(item);
        ArenaIndex(index)
    }

    /// Returns the current number of items in the arena.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in the arena.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Arena<T> {
    #[inline]
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Index<ArenaIndex> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: ArenaIndex) -> &T {
        &self.items[index.0]
    }
}

impl<T> IndexMut<ArenaIndex> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, index: ArenaIndex) -> &mut T {
        &mut self.items[index.0]
    }
}

/// An index into an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ArenaIndex(usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_basic_operations() {
        let mut arena: Arena<i32> = Arena::with_capacity(4);

        let idx1 = arena.push(42);
        let idx2 = arena.push(84);

        assert_eq!(arena[idx1], 42);
        assert_eq!(arena[idx2], 84);
        assert_eq!(arena.len(), 2);
        assert_ne!(idx1, idx2);
    }

    #[test]
    fn arena_index_mut() {
        let mut arena = Arena::default();
        let idx = arena.push(1u8);
        arena[idx] += 1;
        assert_eq!(arena.iter().copied().collect::<Vec<_>>(), [2]);
    }
}
