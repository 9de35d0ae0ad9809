mod tree;
mod balance;
mod verify;
mod node;
mod preorder;
mod inorder;
mod postorder;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use postorder::*;
pub use verify::InvariantError;

use std::fmt;
use std::borrow::Borrow;
use std::ops::Index;

use tree::Tree;

/// An ordered map based on a height-balanced binary search tree (AVL tree)
///
/// BST properties: For each node with key `k`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than `k`
///
/// AVL property: For each node, the heights of its left and right subtrees differ by at most one.
/// This keeps the height of the tree within about `1.44 * log2(n + 2)`, so lookups, insertions and
/// removals are all `O(log n)`.
///
/// Nodes are stored in a single arena and refer to each other by index. Removing an entry frees its
/// slot in the arena for the next insertion.
#[derive(Clone)]
pub struct AvlMap<K, V> {
    tree: Tree<K, V>,
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self {
            tree: Tree::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal if they contain the same entries, no matter how their trees are shaped
impl<K: PartialEq, V: PartialEq> PartialEq for AvlMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlMap<K, V> {}

impl<K, V> AvlMap<K, V> {
    /// Creates an empty `AvlMap`
    ///
    /// The map is initially created with a capacity of 0, so it will not allocate until it is first
    /// inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlMap;
    /// let mut map: AvlMap<&str, i32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with the specified capacity.
    ///
    /// The map will be able to hold at least `capacity` entries without reallocating. If
    /// `capacity` is 0, the map will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the map
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the map is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.tree.nodes.is_empty(), self.tree.root.is_null());
        self.tree.nodes.is_empty()
    }

    /// Returns the number of entries the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.tree.nodes.capacity()
    }

    /// Returns the number of levels in the tree: 0 for an empty map, 1 for a single entry
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlMap;
    ///
    /// // Ascending insertions would turn a plain binary search tree into a list of height 1000
    /// let map: AvlMap<_, _> = (0..1000).map(|i| (i, ())).collect();
    /// assert!(map.height() <= 14);
    /// ```
    pub fn height(&self) -> usize {
        self.root().map_or(0, |node| node.height())
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty
    ///
    /// Time complexity: `O(log n)`
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = &self.tree.nodes[self.tree.first()?];
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key, or `None` if the map is empty
    ///
    /// Time complexity: `O(log n)`
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = &self.tree.nodes[self.tree.last()?];
        Some((&node.key, &node.value))
    }

    /// Removes all entries from the map
    ///
    /// Note that this method has no effect on the allocated capacity of the map.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Reserves capacity for at least `additional` more entries to be inserted in the map.
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.tree.nodes.reserve(additional);
    }

    /// Shrinks the capacity of the map as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.tree.nodes.shrink_to_fit();
    }

    /// Returns an iterator over the entries of the map, sorted by key
    pub fn iter(&self) -> IterInorder<K, V> {
        self.iter_inorder()
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<K, V> {
        IterPreorder::new(&self.tree.nodes, self.tree.root)
    }

    /// Performs an in-order traversal of the tree
    pub fn iter_inorder(&self) -> IterInorder<K, V> {
        IterInorder::new(&self.tree.nodes, self.tree.root)
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<K, V> {
        IterPostorder::new(&self.tree.nodes, self.tree.root)
    }

    /// Returns an iterator over the keys of the map in ascending order
    pub fn keys(&self) -> Keys<K, V> {
        Keys {inner: self.iter_inorder()}
    }

    /// Returns an iterator over the values of the map in ascending order of their keys
    pub fn values(&self) -> Values<K, V> {
        Values {inner: self.iter_inorder()}
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// Note that the root can be **any** node inserted into the tree. It changes as the tree is
    /// rebalanced. For a guaranteed ordering, use the various iteration methods.
    ///
    /// This is a low-level API meant to be used for implementing traversals and for inspecting the
    /// structure of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    /// map.insert(30, "c");
    ///
    /// let root = map.root().unwrap();
    /// assert_eq!(*root.key(), 20);
    /// assert_eq!(root.balance(), 0);
    /// assert_eq!(root.left().map(|node| *node.key()), Some(10));
    /// assert_eq!(root.right().map(|node| *node.key()), Some(30));
    /// ```
    pub fn root(&self) -> Option<Node<K, V>> {
        Node::new(&self.tree.nodes, self.tree.root)
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Returns a reference to the value corresponding to the given key, or `None` if no such key
    /// exists in the map
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed form
    /// must match the ordering on the key type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(String::from("abc"), 1);
    /// assert_eq!(map.get("abc"), Some(&1));
    /// assert_eq!(map.get("def"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and a reference to the value corresponding to the given key
    ///
    /// Time complexity: `O(log n)`
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let node = &self.tree.nodes[self.tree.find(key)?];
        Some((&node.key, &node.value))
    }

    /// Returns a mutable reference to the value corresponding to the given key, or `None` if no such
    /// key exists in the map
    ///
    /// Time complexity: `O(log n)`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let ptr = self.tree.find(key)?;
        Some(&mut self.tree.nodes[ptr].value)
    }

    /// Returns true if the map contains a value for the given key
    ///
    /// Time complexity: `O(log n)`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Inserts a key-value pair into the map, rebalancing the tree if needed
    ///
    /// Returns the previous value if the key was already present, in which case only the value is
    /// replaced and the tree is left as is. The stored key is not updated. Returns `None` if a new
    /// node was inserted.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.balanced_insert(key, value)
    }

    /// Removes a key from the map, returning its value if the key was present
    ///
    /// Removing a key that is not in the map does nothing.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key was present
    ///
    /// Time complexity: `O(log n)`
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let ptr = self.tree.find(key)?;
        Some(self.balanced_remove(ptr))
    }

    /// Removes and returns the entry with the smallest key, or `None` if the map is empty
    ///
    /// Time complexity: `O(log n)`
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let ptr = self.tree.first()?;
        Some(self.balanced_remove(ptr))
    }

    /// Removes and returns the entry with the largest key, or `None` if the map is empty
    ///
    /// Time complexity: `O(log n)`
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let ptr = self.tree.last()?;
        Some(self.balanced_remove(ptr))
    }
}

impl<K, Q, V> Index<&Q> for AvlMap<K, V>
    where K: Borrow<Q> + Ord,
          Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the given key
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no entry found for key"),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = IterInorder<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}
