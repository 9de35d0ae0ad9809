use std::iter::FusedIterator;

use crate::map::AvlMap;

pub struct IterPreorder<'a, T> {
    inner: crate::map::IterPreorder<'a, T, ()>
}

impl<'a, T> Clone for IterPreorder<'a, T> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, T> IterPreorder<'a, T> {
    pub(super) fn new(map: &'a AvlMap<T, ()>) -> Self {
        Self {
            inner: map.iter_preorder(),
        }
    }
}

impl<'a, T> Iterator for IterPreorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for IterPreorder<'a, T> {}

impl<'a, T> FusedIterator for IterPreorder<'a, T> {}
