use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::tree::InnerNode;

/// An iterator over the entries of an `AvlMap` that visits both subtrees of a node before the node
/// itself
pub struct IterPostorder<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    stack: Vec<Ptr>,
    remaining: usize,
}

impl<'a, K, V> Clone for IterPostorder<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a, K, V> IterPostorder<'a, K, V> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, root: Ptr) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: nodes.len(),
        };
        iter.descend(root);
        iter
    }

    /// Walks down the left spine starting at `current`, leaving each right child on the stack below
    /// its parent
    fn descend(&mut self, mut current: Ptr) {
        while let Some(ptr) = current.into_option() {
            let node = &self.nodes[ptr];
            self.stack.extend(node.right.into_option());
            self.stack.push(ptr);
            current = node.left;
        }
    }
}

impl<'a, K, V> Iterator for IterPostorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_ptr) = self.stack.pop() {
            let nodes = self.nodes;
            let node = &nodes[current_ptr];

            // If the top of the stack is the current node's right child, that subtree has not been
            // visited yet
            match node.right.into_option() {
                Some(right) if self.stack.last().copied() == Some(right) => {
                    self.stack.pop();
                    self.stack.push(current_ptr);
                    self.descend(right);
                },

                _ => {
                    self.remaining -= 1;
                    return Some((&node.key, &node.value));
                },
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for IterPostorder<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterPostorder<'a, K, V> {}
