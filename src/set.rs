mod node;
mod preorder;
mod inorder;
mod postorder;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use postorder::*;

use std::fmt;
use std::borrow::Borrow;

use crate::map::{AvlMap, InvariantError};

/// An ordered set based on a height-balanced binary search tree (AVL tree)
///
/// BST properties: For each node with value `v`:
/// - The value of each node in the left subtree is less than `v`
/// - The value of each node in the right subtree is greater than `v`
///
/// Duplicate values are not allowed. Inserting a value that already exists in the set does not
/// modify the set.
///
/// The tree is rebalanced after every insertion and removal so that the heights of the two
/// subtrees of any node differ by at most one.
#[derive(Clone)]
pub struct AvlSet<T> {
    items: AvlMap<T, ()>,
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self {
            items: Default::default(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for AvlSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.eq(&other.items)
    }
}

impl<T: Eq> Eq for AvlSet<T> {}

impl<T> AvlSet<T> {
    /// Creates an empty `AvlSet`
    ///
    /// The set is initially created with a capacity of 0, so it will not allocate until it is first
    /// inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    /// let mut set: AvlSet<&str> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with the specified capacity.
    ///
    /// The set will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the set will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    /// let mut set: AvlSet<&str> = AvlSet::with_capacity(10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: AvlMap::with_capacity(capacity),
        }
    }

    /// Returns the number of items in the set (i.e. the number of nodes in the tree)
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    /// let set: AvlSet<&str> = AvlSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns true if the set is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of levels in the tree: 0 for an empty set, 1 for a single value
    pub fn height(&self) -> usize {
        self.items.height()
    }

    /// Returns the smallest value in the set, if any
    ///
    /// Time complexity: `O(log n)`
    pub fn first(&self) -> Option<&T> {
        self.items.first_key_value().map(|(value, ())| value)
    }

    /// Returns the largest value in the set, if any
    ///
    /// Time complexity: `O(log n)`
    pub fn last(&self) -> Option<&T> {
        self.items.last_key_value().map(|(value, ())| value)
    }

    /// Clears the set, removing all elements
    ///
    /// Note that this method has no effect on the allocated capacity of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert("abc");
    /// # let capacity = set.capacity();
    /// assert!(!set.is_empty());
    /// set.clear();
    /// assert!(set.is_empty());
    /// # assert_eq!(set.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns an iterator over the values in the set in ascending order
    pub fn iter(&self) -> IterInorder<T> {
        self.iter_inorder()
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<T> {
        IterPreorder::new(&self.items)
    }

    /// Performs an in-order traversal of the tree
    pub fn iter_inorder(&self) -> IterInorder<T> {
        IterInorder::new(&self.items)
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<T> {
        IterPostorder::new(&self.items)
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// Note that the root can be **any** node inserted into the tree. It changes as the tree is
    /// rebalanced. For a guaranteed ordering, use the various iteration methods.
    ///
    /// This is a low-level API meant to be used for implementing traversals.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use avl::{AvlSet, set::Node};
    ///
    /// #[derive(Debug, PartialOrd, Ord, PartialEq, Eq)]
    /// struct Person {
    ///     pub name: String,
    ///     // ...other fields...
    /// }
    ///
    /// // Custom traversal through the values in the set
    /// fn find_name<'a>(node: Option<Node<'a, Person>>, target_name: &str) -> Option<Node<'a, Person>> {
    ///     let node = node?;
    ///     if node.value().name == target_name {
    ///         Some(node)
    ///     } else {
    ///         find_name(node.left(), target_name)
    ///             .or_else(|| find_name(node.right(), target_name))
    ///     }
    /// }
    ///
    /// fn main() {
    ///     let mut set = AvlSet::new();
    ///
    ///     set.insert(Person {
    ///         name: String::from("Manish"),
    ///         // ...other fields...
    ///     });
    ///     // ...more insertions...
    ///
    ///     // Find the node with name == "Jane"
    ///     println!("{:?}", find_name(set.root(), "Jane"));
    /// }
    /// ```
    pub fn root(&self) -> Option<Node<T>> {
        self.items.root().map(Node::new)
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the set.
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional)
    }

    /// Shrinks the capacity of the set as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit()
    }
}

impl<T: Ord> AvlSet<T> {
    /// Returns `true` if the set contains the specified value.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering on the borrowed
    /// form must match the ordering on the value type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// # assert!(!set.contains(&1));
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.items.contains_key(value)
    }

    /// Returns a reference to the value in the set, or `None` if no such value exists
    ///
    /// Time complexity: `O(log n)`
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.items.get_key_value(value).map(|(value, ())| value)
    }

    /// Inserts a new value into the set
    ///
    /// If the set did not have this value present, `true` is returned.
    ///
    /// If the set did have this value present, `false` is returned, and the entry is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(37));
    /// assert!(!set.insert(37));
    /// assert!(set.contains(&37));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        // An existing key is never replaced, only its (empty) value
        self.items.insert(value, ()).is_none()
    }

    /// Removes a value from the set. Returns whether the value was present in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(String::from("abc"));
    /// assert!(set.remove("abc"));
    /// assert!(!set.remove("def"));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(String::from("abc"));
    /// assert_eq!(set.take("abc"), Some(String::from("abc")));
    /// assert_eq!(set.take("def"), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.items.remove_entry(value).map(|(value, ())| value)
    }

    /// Removes and returns the smallest value in the set, if any
    pub fn pop_first(&mut self) -> Option<T> {
        self.items.pop_first().map(|(value, ())| value)
    }

    /// Removes and returns the largest value in the set, if any
    pub fn pop_last(&mut self) -> Option<T> {
        self.items.pop_last().map(|(value, ())| value)
    }

    /// Verifies the structural invariants of the tree. See `AvlMap::check_invariants`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.items.check_invariants()
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T> {
    type Item = &'a T;
    type IntoIter = IterInorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        set.extend(iter);
        set
    }
}
