use thiserror::Error;

use crate::slab::{Ptr, Slab};

use super::AvlMap;
use super::tree::InnerNode;

/// A structural invariant that does not hold for a tree
///
/// Nodes are identified by their position in an in-order traversal (starting at 0), which is stable
/// regardless of how the tree happens to be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("key at position {position} is not greater than the key before it")]
    Unordered { position: usize },

    #[error("node at position {position} stores balance {stored} but its subtrees differ by {actual}")]
    BalanceMismatch { position: usize, stored: i8, actual: isize },

    #[error("node at position {position} has balance {balance}, outside of -1..=1")]
    Unbalanced { position: usize, balance: i8 },

    #[error("node at position {position} does not point back to its parent")]
    BrokenParentLink { position: usize },

    #[error("expected {expected} reachable nodes, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

struct Checker<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    previous: Option<&'a K>,
    /// Number of nodes visited so far
    position: usize,
}

impl<'a, K: Ord, V> Checker<'a, K, V> {
    /// Checks the subtree rooted at `ptr` and returns its height (0 for an empty subtree)
    fn check(&mut self, ptr: Ptr, parent: Ptr) -> Result<usize, InvariantError> {
        let nodes = self.nodes;
        let node = match nodes.get(ptr) {
            Some(node) => node,
            None => return Ok(0),
        };

        let left_height = self.check(node.left, ptr)?;

        let position = self.position;
        self.position += 1;

        if node.parent != parent {
            return Err(InvariantError::BrokenParentLink {position});
        }

        if let Some(previous) = self.previous {
            if previous >= &node.key {
                return Err(InvariantError::Unordered {position});
            }
        }
        self.previous = Some(&node.key);

        let right_height = self.check(node.right, ptr)?;

        let actual = right_height as isize - left_height as isize;
        if actual != node.balance as isize {
            return Err(InvariantError::BalanceMismatch {position, stored: node.balance, actual});
        }
        if !(-1..=1).contains(&node.balance) {
            return Err(InvariantError::Unbalanced {position, balance: node.balance});
        }

        Ok(left_height.max(right_height) + 1)
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Verifies the structural invariants of the tree
    ///
    /// Checks that keys are strictly increasing in-order, that every stored balance equals the
    /// height of the right subtree minus the height of the left subtree, that no balance is outside
    /// of `-1..=1`, and that every node links back to its parent. Returns the first violation found.
    ///
    /// These invariants hold after every operation, so this always returns `Ok(())` unless there is
    /// a bug. Time complexity: `O(n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlMap;
    ///
    /// let map: AvlMap<_, _> = (0..100).map(|i| (i, i * i)).collect();
    /// assert_eq!(map.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut checker = Checker {
            nodes: &self.tree.nodes,
            previous: None,
            position: 0,
        };
        checker.check(self.tree.root, Ptr::null())?;

        if checker.position != self.len() {
            return Err(InvariantError::LengthMismatch {
                expected: self.len(),
                actual: checker.position,
            });
        }

        Ok(())
    }
}
