use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::slab::{Ptr, Slab};

/// One of the two child slots of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The change in a node's balance when the subtree on this side grows by one level
    pub fn sign(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct InnerNode<K, V> {
    pub key: K,
    pub value: V,
    /// height(right) - height(left)
    pub balance: i8,
    /// Non-owning back-reference, only used to walk upwards
    pub parent: Ptr,
    pub left: Ptr,
    pub right: Ptr,
}

impl<K, V> InnerNode<K, V> {
    fn new(key: K, value: V, parent: Ptr) -> Self {
        Self {
            key,
            value,
            balance: 0,
            parent,
            left: Ptr::null(),
            right: Ptr::null(),
        }
    }

    pub fn child(&self, side: Side) -> Ptr {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Ptr {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// The result of searching the tree for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// The key is stored in this node
    Occupied(Ptr),
    /// The key is absent and would be attached as the `side` child of `parent`. A null `parent`
    /// means the tree is empty.
    Vacant { parent: Ptr, side: Side },
}

/// A plain (unbalanced) binary search tree stored in a slab
///
/// Provides lookup, structural insertion and removal, and navigation. None of these operations
/// look at or update the `balance` of a node. Keeping the tree balanced is up to the caller.
#[derive(Debug, Clone)]
pub(crate) struct Tree<K, V> {
    pub nodes: Slab<InnerNode<K, V>>,
    pub root: Ptr,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self {
            nodes: Slab::new(),
            root: Ptr::null(),
        }
    }
}

impl<K, V> Tree<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: Ptr::null(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = Ptr::null();
    }

    /// Returns which child of its parent `ptr` is, or `None` if `ptr` is the root
    pub fn side_of(&self, ptr: Ptr) -> Option<Side> {
        let parent = self.nodes[ptr].parent.into_option()?;
        Some(self.side_in(parent, ptr))
    }

    /// Returns which child `child` is of `parent`
    pub fn side_in(&self, parent: Ptr, child: Ptr) -> Side {
        let parent_node = &self.nodes[parent];
        if parent_node.left == child {
            Side::Left
        } else {
            debug_assert_eq!(parent_node.right, child, "node is not a child of its parent");
            Side::Right
        }
    }

    /// Puts `new` in the slot of `parent` that currently holds `old` and reparents `new`
    ///
    /// A null `parent` means `old` is the root.
    pub fn replace_child(&mut self, parent: Ptr, old: Ptr, new: Ptr) {
        match parent.into_option() {
            Some(parent) => {
                let side = self.side_in(parent, old);
                *self.nodes[parent].child_mut(side) = new;
            },
            None => self.root = new,
        }

        if let Some(new) = new.into_option() {
            self.nodes[new].parent = parent;
        }
    }

    /// Returns the node furthest down on `side` in the subtree rooted at `ptr`
    pub fn extreme(&self, mut ptr: Ptr, side: Side) -> Ptr {
        while let Some(next) = self.nodes[ptr].child(side).into_option() {
            ptr = next;
        }
        ptr
    }

    /// Returns the node with the smallest key, or `None` if the tree is empty
    pub fn first(&self) -> Option<Ptr> {
        let root = self.root.into_option()?;
        Some(self.extreme(root, Side::Left))
    }

    /// Returns the node with the largest key, or `None` if the tree is empty
    pub fn last(&self) -> Option<Ptr> {
        let root = self.root.into_option()?;
        Some(self.extreme(root, Side::Right))
    }

    /// Returns the node holding the largest key strictly less than the key in `ptr`
    pub fn predecessor(&self, ptr: Ptr) -> Option<Ptr> {
        if let Some(left) = self.nodes[ptr].left.into_option() {
            return Some(self.extreme(left, Side::Right));
        }

        // Nearest ancestor that has `ptr` in its right subtree
        let mut current = ptr;
        let mut parent = self.nodes[ptr].parent;
        while let Some(parent_ptr) = parent.into_option() {
            let parent_node = &self.nodes[parent_ptr];
            if parent_node.right == current {
                return Some(parent_ptr);
            }
            current = parent_ptr;
            parent = parent_node.parent;
        }

        None
    }

    /// Creates a new leaf in the given vacant slot and returns it
    ///
    /// The key MUST belong in that slot to maintain the BST property.
    pub fn attach(&mut self, parent: Ptr, side: Side, key: K, value: V) -> Ptr {
        let ptr = self.nodes.push(InnerNode::new(key, value, parent));
        match parent.into_option() {
            Some(parent) => {
                let slot = self.nodes[parent].child_mut(side);
                debug_assert!(slot.is_null(), "attaching over an existing subtree");
                *slot = ptr;
            },

            None => {
                debug_assert!(self.root.is_null(), "attaching a second root");
                self.root = ptr;
            },
        }

        ptr
    }

    /// Removes a node that has at most one child from the tree, splicing its child (if any) into
    /// its place. Returns the removed node.
    pub fn unlink(&mut self, ptr: Ptr) -> InnerNode<K, V> {
        let node = &self.nodes[ptr];
        debug_assert!(node.left.is_null() || node.right.is_null(), "unlinking a node with two children");

        let child = if node.left.is_null() { node.right } else { node.left };
        let parent = node.parent;
        self.replace_child(parent, ptr, child);

        self.nodes.remove(ptr)
    }

    /// Exchanges the positions of two nodes in the tree
    ///
    /// Each node keeps its own key, value and balance, so afterwards the key and value of `a`
    /// sit where `b` used to be and vice versa. The stored balances move along with their nodes.
    pub fn swap_positions(&mut self, a: Ptr, b: Ptr) {
        if a == b {
            return;
        }

        let swapped = |ptr: Ptr| if ptr == a { b } else if ptr == b { a } else { ptr };

        let node_a = &self.nodes[a];
        let (a_parent, a_left, a_right) = (node_a.parent, node_a.left, node_a.right);
        let node_b = &self.nodes[b];
        let (b_parent, b_left, b_right) = (node_b.parent, node_b.left, node_b.right);

        // Every other node linked to `a` or `b` now links to the other one. Works even if the two
        // nodes are adjacent or siblings since each neighbour is only updated once.
        let neighbours = [a_parent, a_left, a_right, b_parent, b_left, b_right];
        for (i, &ptr) in neighbours.iter().enumerate() {
            if ptr.is_null() || ptr == a || ptr == b || neighbours[..i].contains(&ptr) {
                continue;
            }

            let node = &mut self.nodes[ptr];
            node.parent = swapped(node.parent);
            node.left = swapped(node.left);
            node.right = swapped(node.right);
        }

        let node_a = &mut self.nodes[a];
        node_a.parent = swapped(b_parent);
        node_a.left = swapped(b_left);
        node_a.right = swapped(b_right);

        let node_b = &mut self.nodes[b];
        node_b.parent = swapped(a_parent);
        node_b.left = swapped(a_left);
        node_b.right = swapped(a_right);

        self.root = swapped(self.root);
    }
}

impl<K: Ord, V> Tree<K, V> {
    /// Returns the node holding `key`, if any
    pub fn find<Q>(&self, key: &Q) -> Option<Ptr>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        match self.search(key) {
            Slot::Occupied(ptr) => Some(ptr),
            Slot::Vacant {..} => None,
        }
    }

    /// Descends from the root comparing against `key`
    pub fn search<Q>(&self, key: &Q) -> Slot
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root;
        let mut parent = Ptr::null();
        let mut side = Side::Left;
        while let Some(ptr) = current.into_option() {
            let node = &self.nodes[ptr];
            side = match key.cmp(node.key.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Slot::Occupied(ptr),
            };
            parent = ptr;
            current = node.child(side);
        }

        Slot::Vacant {parent, side}
    }
}
