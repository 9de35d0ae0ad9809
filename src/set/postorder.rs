use std::iter::FusedIterator;

use crate::map::AvlMap;

pub struct IterPostorder<'a, T> {
    inner: crate::map::IterPostorder<'a, T, ()>
}

impl<'a, T> Clone for IterPostorder<'a, T> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, T> IterPostorder<'a, T> {
    pub(super) fn new(map: &'a AvlMap<T, ()>) -> Self {
        Self {
            inner: map.iter_postorder(),
        }
    }
}

impl<'a, T> Iterator for IterPostorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for IterPostorder<'a, T> {}

impl<'a, T> FusedIterator for IterPostorder<'a, T> {}
