use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::tree::InnerNode;

/// An iterator over the entries of an `AvlMap` that visits each node before its subtrees
pub struct IterPreorder<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    stack: Vec<Ptr>,
    remaining: usize,
}

impl<'a, K, V> Clone for IterPreorder<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> IterPreorder<'a, K, V> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, root: Ptr) -> Self {
        Self {
            nodes,
            stack: root.into_option().into_iter().collect(),
            remaining: nodes.len(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, K, V> Iterator for IterPreorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let top_ptr = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[top_ptr];
        self.stack.extend(node.right.into_option());
        self.stack.extend(node.left.into_option());
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for IterPreorder<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterPreorder<'a, K, V> {}
