use std::ptr;
use std::fmt;

use crate::slab::{Ptr, Slab};

use super::tree::InnerNode;

/// A single node of the AVL tree
///
/// Nodes are read-only. The shape of the tree is entirely up to the balancing logic, so this is
/// mostly useful for custom traversals and for inspecting the structure of the tree.
pub struct Node<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    node: &'a InnerNode<K, V>,
}

impl<'a, K, V> fmt::Debug for Node<'a, K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("value", self.value())
            .field("balance", &self.balance())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K, V> Clone for Node<'a, K, V> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, K, V> Copy for Node<'a, K, V> {}

impl<'a, K: PartialEq, V: PartialEq> PartialEq for Node<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Two handles to the same slot of the same tree are trivially equal
        let ptr_eq = ptr::eq(self.nodes, other.nodes) && ptr::eq(self.node, other.node);
        ptr_eq || (self.key().eq(other.key()) && self.value().eq(other.value()))
    }
}

impl<'a, K: Eq, V: Eq> Eq for Node<'a, K, V> {}

impl<'a, K, V> Node<'a, K, V> {
    /// Returns the node at `ptr`, or `None` if `ptr` is null
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, ptr: Ptr) -> Option<Self> {
        let ptr = ptr.into_option()?;
        Some(Self {nodes, node: &nodes[ptr]})
    }

    /// Returns the key of this node
    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Returns the value of this node
    pub fn value(&self) -> &'a V {
        &self.node.value
    }

    /// Returns the height of the right subtree minus the height of the left subtree
    ///
    /// Always one of -1, 0 or 1.
    pub fn balance(&self) -> i8 {
        self.node.balance
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        !self.node.left.is_null()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        !self.node.right.is_null()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.left)
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.right)
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.parent)
    }

    /// Returns the number of nodes on the longest path from this node down to a leaf, counting this
    /// node, so a leaf has height 1
    ///
    /// Time complexity: `O(log n)`
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = Some(*self);
        // The balance always points at the taller subtree, so there is no need to visit both
        while let Some(node) = current {
            height += 1;
            current = if node.balance() > 0 { node.right() } else { node.left() };
        }
        height
    }
}
