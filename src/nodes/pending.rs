use super::FinalizedBranch;
use crate::{TriePath, TrieValue, arena::ArenaIndex};
use alloc::sync::Arc;

/// A branch as the builder sees it: structure only, no hashes.
///
/// Internal nodes always have both children.
#[derive(Clone, Debug)]
pub(crate) enum PendingBranch<V> {
    Leaf { path: TriePath, value: V },
    Node { path: TriePath, left: ArenaIndex, right: ArenaIndex },
}

impl<V> PendingBranch<V> {
    /// Path of the branch relative to its parent.
    pub(crate) const fn path(&self) -> &TriePath {
        match self {
            Self::Leaf { path, .. } | Self::Node { path, .. } => path,
        }
    }

    pub(crate) fn set_path(&mut self, new_path: TriePath) {
        match self {
            Self::Leaf { path, .. } | Self::Node { path, .. } => *path = new_path,
        }
    }
}

/// Arena slot: a pending branch and the finalized form cached by the last root calculation.
///
/// The cache is cleared whenever the branch or anything below it changes.
#[derive(Clone, Debug)]
pub(crate) struct Slot<V: TrieValue> {
    pub(crate) branch: PendingBranch<V>,
    pub(crate) finalized: Option<Arc<FinalizedBranch<V>>>,
}

impl<V: TrieValue> Slot<V> {
    pub(crate) const fn new(branch: PendingBranch<V>) -> Self {
        Self { branch, finalized: None }
    }

    pub(crate) fn invalidate(&mut self) {
        self.finalized = None;
    }

    #[cfg(test)]
    pub(crate) const fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }
}
