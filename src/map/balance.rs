//! AVL rebalancing on top of the plain tree in `tree.rs`
//!
//! Every node stores `balance = height(right) - height(left)`. Structural edits only change the
//! heights along the path from the edited node up to the root, so both fix-ups walk that path one
//! parent link at a time. At each level they either stop (the subtree height did not change),
//! continue (the height changed but the node is still within -1..=1) or rotate.
//!
//! The cases for a node leaning left are mirror images of the cases for a node leaning right. All
//! of them are written once in terms of the heavy `Side` and its `sign()`.

use std::mem;

use super::AvlMap;
use super::tree::{InnerNode, Side, Slot};
use crate::slab::Ptr;

impl<K, V> AvlMap<K, V> {
    /// Rotates the subtree rooted at `node` so that `node` moves down to the `down` side of its
    /// child on the opposite side, which takes its place. Returns that child.
    ///
    /// `rotate(node, Side::Left)` is a left rotation and promotes the right child.
    /// `rotate(node, Side::Right)` is a right rotation and promotes the left child.
    ///
    /// Balances are NOT updated. The caller must set them afterwards.
    pub(super) fn rotate(&mut self, node: Ptr, down: Side) -> Ptr {
        #[cfg(feature = "tracing")]
        tracing::trace!(pivot = ?node, ?down, "rotate");

        let up = down.opposite();
        let tree = &mut self.tree;

        let child = match tree.nodes[node].child(up).into_option() {
            Some(child) => child,
            None => unreachable!("rotation of {:?} to the {:?} requires a {:?} child", node, down, up),
        };

        // The inner subtree of `child` crosses over to `node`
        let inner = tree.nodes[child].child(down);
        *tree.nodes[node].child_mut(up) = inner;
        if let Some(inner) = inner.into_option() {
            tree.nodes[inner].parent = node;
        }

        let parent = tree.nodes[node].parent;
        tree.replace_child(parent, node, child);

        *tree.nodes[child].child_mut(down) = node;
        tree.nodes[node].parent = child;

        child
    }

    /// Exchanges the positions of two nodes, then exchanges their balances so that each balance
    /// stays with the position it describes
    pub(super) fn node_swap(&mut self, a: Ptr, b: Ptr) {
        self.tree.swap_positions(a, b);

        let balance_a = self.tree.nodes[a].balance;
        self.tree.nodes[a].balance = mem::replace(&mut self.tree.nodes[b].balance, balance_a);
    }

    fn set_balance(&mut self, node: Ptr, balance: i8) {
        self.tree.nodes[node].balance = balance;
    }

    /// Called after the subtree rooted at `parent` grew by one level because of a change to its
    /// child `child`. `parent` already has its final balance of -1 or 1.
    fn insert_fix(&mut self, mut parent: Ptr, mut child: Ptr) {
        loop {
            let grandparent = match self.tree.nodes[parent].parent.into_option() {
                Some(grandparent) => grandparent,
                // Reached the root
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(at = ?parent, "insert fix-up reached the root");

                    return;
                },
            };

            let side = self.tree.side_in(grandparent, parent);
            let balance = self.tree.nodes[grandparent].balance + side.sign();
            self.set_balance(grandparent, balance);

            match balance {
                0 => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(at = ?grandparent, "insert fix-up stopped, height unchanged");

                    return;
                },

                -1 | 1 => {
                    child = parent;
                    parent = grandparent;
                },

                -2 | 2 => {
                    // `grandparent` is too heavy on `side`
                    let lean = side.sign();
                    if self.tree.nodes[parent].child(side) == child {
                        // zig-zig
                        self.rotate(grandparent, side.opposite());
                        self.set_balance(grandparent, 0);
                        self.set_balance(parent, 0);
                    } else {
                        // zig-zag
                        let child_balance = self.tree.nodes[child].balance;
                        self.rotate(parent, side);
                        self.rotate(grandparent, side.opposite());

                        let (parent_balance, grandparent_balance) = match child_balance * lean {
                            1 => (0, -lean),
                            0 => (0, 0),
                            -1 => (lean, 0),
                            _ => unreachable!("child balance {} during insert zig-zag", child_balance),
                        };
                        self.set_balance(parent, parent_balance);
                        self.set_balance(grandparent, grandparent_balance);
                        self.set_balance(child, 0);
                    }

                    #[cfg(feature = "tracing")]
                    tracing::trace!(at = ?grandparent, "insert fix-up rotated");

                    return;
                },

                _ => unreachable!("balance {} after insertion", balance),
            }
        }
    }

    /// Called after the subtree on one side of `node` lost a level. `diff` is the change this
    /// causes to the balance of `node`: `1` if the left side shrank, `-1` if the right side shrank.
    fn remove_fix(&mut self, node: Ptr, diff: i8) {
        let mut current = Some(node);
        let mut diff = diff;
        while let Some(node) = current {
            let parent = self.tree.nodes[node].parent;
            // Only used if the height of `node` ends up decreasing
            let next_diff = self.tree.side_of(node).map_or(0, |side| -side.sign());

            let tentative = self.tree.nodes[node].balance + diff;
            match tentative {
                -2 | 2 => {
                    let heavy = if tentative < 0 { Side::Left } else { Side::Right };
                    let lean = heavy.sign();
                    let child = self.tree.nodes[node].child(heavy);
                    let child_balance = self.tree.nodes[child].balance;

                    match child_balance * lean {
                        // zig-zig, the subtree gets shorter
                        1 => {
                            self.rotate(node, heavy.opposite());
                            self.set_balance(node, 0);
                            self.set_balance(child, 0);
                        },

                        // zig-zig, the subtree keeps its height
                        0 => {
                            self.rotate(node, heavy.opposite());
                            self.set_balance(node, lean);
                            self.set_balance(child, -lean);

                            #[cfg(feature = "tracing")]
                            tracing::trace!(at = ?node, "remove fix-up stopped after rotation");

                            return;
                        },

                        // zig-zag, the subtree gets shorter
                        -1 => {
                            let grandchild = self.tree.nodes[child].child(heavy.opposite());
                            let grandchild_balance = self.tree.nodes[grandchild].balance;
                            self.rotate(child, heavy);
                            self.rotate(node, heavy.opposite());

                            let (node_balance, child_balance) = match grandchild_balance * lean {
                                -1 => (0, lean),
                                0 => (0, 0),
                                1 => (-lean, 0),
                                _ => unreachable!("grandchild balance {} during remove zig-zag", grandchild_balance),
                            };
                            self.set_balance(node, node_balance);
                            self.set_balance(child, child_balance);
                            self.set_balance(grandchild, 0);
                        },

                        _ => unreachable!("child balance {} during removal", child_balance),
                    }
                },

                -1 | 1 => {
                    self.set_balance(node, tentative);

                    #[cfg(feature = "tracing")]
                    tracing::trace!(at = ?node, "remove fix-up stopped, height unchanged");

                    return;
                },

                0 => self.set_balance(node, 0),

                _ => unreachable!("balance {} after removal", tentative),
            }

            current = parent.into_option();
            diff = next_diff;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!("remove fix-up reached the root");
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Inserts `key`, or overwrites its value if it is already present. Returns the previous value.
    pub(super) fn balanced_insert(&mut self, key: K, value: V) -> Option<V> {
        let (parent, side) = match self.tree.search(&key) {
            Slot::Occupied(ptr) => {
                return Some(mem::replace(&mut self.tree.nodes[ptr].value, value));
            },
            Slot::Vacant {parent, side} => (parent, side),
        };

        let leaf = self.tree.attach(parent, side, key, value);
        if let Some(parent) = parent.into_option() {
            let balance = self.tree.nodes[parent].balance + side.sign();
            self.set_balance(parent, balance);

            // Otherwise the leaf filled the shorter side and the height of `parent` is unchanged
            if balance != 0 {
                self.insert_fix(parent, leaf);
            }
        }

        None
    }

    /// Removes the node `target` from the tree and returns its key and value
    pub(super) fn balanced_remove(&mut self, target: Ptr) -> (K, V) {
        let node = &self.tree.nodes[target];
        if !node.left.is_null() && !node.right.is_null() {
            let predecessor = match self.tree.predecessor(target) {
                Some(predecessor) => predecessor,
                None => unreachable!("node with a left subtree has no predecessor"),
            };
            // `target` moves down to where the predecessor was, which has no right child
            self.node_swap(target, predecessor);
        }

        let parent = self.tree.nodes[target].parent;
        // Losing a left child tips the parent to the right and vice versa
        let diff = self.tree.side_of(target).map_or(0, |side| -side.sign());

        let InnerNode {key, value, ..} = self.tree.unlink(target);

        if let Some(parent) = parent.into_option() {
            self.remove_fix(parent, diff);
        }

        (key, value)
    }
}
