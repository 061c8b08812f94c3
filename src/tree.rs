use crate::{
    CommonPath, RootNode, TrieError, TriePath, TrieValue,
    arena::{Arena, ArenaIndex},
    hash::HashAlgorithm,
    nodes::{FinalizedBranch, FinalizedLeaf, FinalizedNode, PendingBranch, Slot},
};
use alloc::sync::Arc;
use alloy_primitives::Bytes;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Mutable builder of a compressed sparse Merkle trie.
///
/// Leaves are keyed by sentinel-encoded [`TriePath`]s and may be added in any order. Chains of
/// single-child nodes are never materialized: every internal node has exactly two children and
/// carries the path segment that leads to it.
///
/// Hashes are computed lazily by [`calculate_root`](Self::calculate_root), which caches the
/// finalized form of every branch. Adding a leaf only clears the cache along the path it touched,
/// so recalculating after a few insertions rehashes only those paths.
///
/// # Example
///
/// ```
/// use alloy_primitives::Bytes;
/// use smt_trie::{SparseMerkleTree, TriePath};
///
/// let mut tree = SparseMerkleTree::default();
/// tree.add_leaf(TriePath::from(0b110u64), Bytes::from_static(b"left")).unwrap();
/// tree.add_leaf(TriePath::from(0b111u64), Bytes::from_static(b"right")).unwrap();
///
/// let root = tree.calculate_root();
/// let proof = root.get_path(&TriePath::from(0b111u64));
/// let result = proof.verify(&TriePath::from(0b111u64));
/// assert!(result.is_path_valid() && result.is_path_included());
/// ```
#[derive(Clone, Debug)]
pub struct SparseMerkleTree<V: TrieValue = Bytes> {
    algorithm: HashAlgorithm,
    arena: Arena<Slot<V>>,
    left: Option<ArenaIndex>,
    right: Option<ArenaIndex>,
    leaves: usize,
}

impl<V: TrieValue> Default for SparseMerkleTree<V> {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

/// Where a branch hangs: one of the two root slots or one side of an internal node.
#[derive(Clone, Copy, Debug)]
enum Link {
    Root { is_right: bool },
    Child { parent: ArenaIndex, is_right: bool },
}

impl<V: TrieValue> SparseMerkleTree<V> {
    /// Creates an empty trie hashed with the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm, arena: Arena::default(), left: None, right: None, leaves: 0 }
    }

    /// Creates an empty trie with room for `leaves` leaves before reallocating.
    pub fn with_capacity(algorithm: HashAlgorithm, leaves: usize) -> Self {
        // Every leaf after the first brings one internal node with it.
        let branches = leaves.saturating_mul(2);
        Self { arena: Arena::with_capacity(branches), ..Self::new(algorithm) }
    }

    /// Returns the hash algorithm of the trie.
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the number of leaves in the trie.
    pub const fn len(&self) -> usize {
        self.leaves
    }

    /// Returns `true` if the trie has no leaves.
    pub const fn is_empty(&self) -> bool {
        self.leaves == 0
    }

    /// Adds a leaf at the given path.
    ///
    /// # Errors
    ///
    /// - [`TrieError::InvalidPath`] if the path carries no key bits.
    /// - [`TrieError::BranchExists`] if the path equals an existing leaf path, or is a prefix of
    ///   an existing branch.
    /// - [`TrieError::LeafOutOfBounds`] if an existing leaf path is a prefix of the new path.
    ///
    /// A rejected insertion leaves the trie unchanged.
    pub fn add_leaf(&mut self, path: TriePath, value: V) -> Result<(), TrieError> {
        if path.is_empty() {
            return Err(TrieError::InvalidPath(path));
        }

        let is_right = path.is_right();
        let root_slot = if is_right { self.right } else { self.left };
        let Some(mut current) = root_slot else {
            trace!(target: "smt::tree", %path, is_right, "adding leaf to empty root slot");
            let leaf = self.arena.push(Slot::new(PendingBranch::Leaf { path, value }));
            self.relink(Link::Root { is_right }, leaf);
            self.leaves += 1;
            return Ok(());
        };

        let mut remaining = path.clone();
        let mut link = Link::Root { is_right };
        let mut visited = SmallVec::<[ArenaIndex; 32]>::new();
        loop {
            let branch = &self.arena[current].branch;
            let common = CommonPath::new(&remaining, branch.path());
            if *common.path() == remaining {
                debug!(target: "smt::tree", %path, "rejected leaf: branch exists");
                return Err(TrieError::BranchExists { path });
            }

            let length = common.length();
            let rest = remaining.skip(length);
            let is_right = rest.is_right();
            match branch {
                PendingBranch::Leaf { path: leaf_path, .. } if common.path() == leaf_path => {
                    debug!(target: "smt::tree", %path, %leaf_path, "rejected leaf: out of bounds");
                    return Err(TrieError::LeafOutOfBounds { path });
                }
                PendingBranch::Node { path: node_path, left, right }
                    if common.path() == node_path =>
                {
                    trace!(target: "smt::tree", %node_path, is_right, "descending into node");
                    visited.push(current);
                    link = Link::Child { parent: current, is_right };
                    current = if is_right { *right } else { *left };
                    remaining = rest;
                    continue;
                }
                _ => {}
            }

            // The new leaf diverges inside `current`: push the shared prefix into a new node.
            trace!(target: "smt::tree", %path, common = %common.path(), length, "splitting branch");
            let slot = &mut self.arena[current];
            let shortened = slot.branch.path().skip(length);
            slot.branch.set_path(shortened);
            slot.invalidate();

            let leaf = self.arena.push(Slot::new(PendingBranch::Leaf { path: rest, value }));
            let (left, right) = if is_right { (current, leaf) } else { (leaf, current) };
            let node = self.arena.push(Slot::new(PendingBranch::Node {
                path: common.path().clone(),
                left,
                right,
            }));
            self.relink(link, node);

            for index in visited {
                self.arena[index].invalidate();
            }
            self.leaves += 1;
            return Ok(());
        }
    }

    /// Hashes every branch changed since the last call and returns the finalized root.
    ///
    /// Calling this twice without adding leaves in between returns equal roots.
    pub fn calculate_root(&mut self) -> RootNode<V> {
        let (root, rehashed) = self.finalize_root();
        debug!(
            target: "smt::tree",
            leaves = self.leaves,
            branches = self.arena.len(),
            rehashed,
            root = ?root.root_hash(),
            "calculated root",
        );
        root
    }

    /// Finalizes both root slots, returning the root and the number of branches rehashed.
    fn finalize_root(&mut self) -> (RootNode<V>, usize) {
        let mut rehashed = 0;
        let (left, right) = (self.left, self.right);
        let left = left.map(|index| self.finalize(index, &mut rehashed));
        let right = right.map(|index| self.finalize(index, &mut rehashed));
        (RootNode::new(self.algorithm, left, right), rehashed)
    }

    /// Number of branches whose cached finalized form is missing.
    #[cfg(test)]
    fn stale_branches(&self) -> usize {
        self.arena.iter().filter(|slot| !slot.is_finalized()).count()
    }

    fn finalize(&mut self, index: ArenaIndex, rehashed: &mut usize) -> Arc<FinalizedBranch<V>> {
        if let Some(finalized) = &self.arena[index].finalized {
            return Arc::clone(finalized);
        }

        let finalized = match &self.arena[index].branch {
            PendingBranch::Leaf { path, value } => FinalizedBranch::Leaf(FinalizedLeaf::new(
                self.algorithm,
                path.clone(),
                value.clone(),
            )),
            PendingBranch::Node { path, left, right } => {
                let (path, left, right) = (path.clone(), *left, *right);
                let left = self.finalize(left, rehashed);
                let right = self.finalize(right, rehashed);
                FinalizedBranch::Node(FinalizedNode::new(self.algorithm, path, left, right))
            }
        };
        trace!(target: "smt::tree", path = %finalized.path(), hash = ?finalized.hash(), "hashed branch");
        *rehashed += 1;

        let finalized = Arc::new(finalized);
        self.arena[index].finalized = Some(Arc::clone(&finalized));
        finalized
    }

    fn relink(&mut self, link: Link, index: ArenaIndex) {
        match link {
            Link::Root { is_right: false } => self.left = Some(index),
            Link::Root { is_right: true } => self.right = Some(index),
            Link::Child { parent, is_right } => {
                if let PendingBranch::Node { left, right, .. } = &mut self.arena[parent].branch {
                    if is_right {
                        *right = index;
                    } else {
                        *left = index;
                    }
                }
            }
        }
    }
}
