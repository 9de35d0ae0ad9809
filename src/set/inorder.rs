use std::iter::FusedIterator;

use crate::map::AvlMap;

pub struct IterInorder<'a, T> {
    inner: crate::map::IterInorder<'a, T, ()>
}

impl<'a, T> Clone for IterInorder<'a, T> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, T> IterInorder<'a, T> {
    pub(super) fn new(map: &'a AvlMap<T, ()>) -> Self {
        Self {
            inner: map.iter_inorder(),
        }
    }
}

impl<'a, T> Iterator for IterInorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for IterInorder<'a, T> {}

impl<'a, T> FusedIterator for IterInorder<'a, T> {}
