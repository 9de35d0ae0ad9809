use std::mem;
use std::ops::{Index, IndexMut};

#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into a slab, or "null"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent `None` or "null".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(usize);

// Tree nodes store three of these (parent, left, right), so they are kept to a single word
#[cfg(test)]
const_assert_eq!(mem::size_of::<Ptr>(), 8);
// Using `Option<usize>` directly would use more space.
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 16);

impl Default for Ptr {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl Ptr {
    #[inline(always)]
    pub fn new(index: usize) -> Option<Self> {
        if index == usize::MAX {
            None
        } else {
            Some(Ptr(index))
        }
    }

    #[inline(always)]
    pub fn null() -> Self {
        Ptr(usize::MAX)
    }

    // Methods on this type must be `#[inline]` to help the compiler see that the `Option` values
    // are only intermediate values used to make writing code easier. Instead of checking for `None`
    // and then `usize::MAX`, we want the compiler to just check the latter.
    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let Ptr(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    /// Returns `None` for the null pointer, and `Some(self)` otherwise
    #[inline(always)]
    pub fn into_option(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    /// A slot on the free list. Holds the index of the next free slot or `Ptr::null()` if this is
    /// the last entry in the free list
    Vacant(Ptr),
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Items are kept contiguously in memory, but indexes are not shifted when an individual item is
/// removed. Instead of always pushing items after the previously pushed item, this data structure
/// will reuse space from previously removed entries when possible. This makes removal cheaper than
/// a standard `Vec<T>` and keeps every `Ptr` handed out by `push` stable until that entry is
/// removed.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// The index of the first entry in the free list or Ptr::null() if the free list is empty
    ///
    /// The free list is a linked list stored in `entries` that is used as a stack to track which
    /// entries have space that can be reused in calls to `push`.
    free_list_head: Ptr,
    /// The number of occupied entries
    len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::default(),
            free_list_head: Ptr::null(),
            len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab with the specified capacity.
    ///
    /// The slab will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the slab will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the slab that contain values
    ///
    /// This is the number of items pushed minus the number of items removed
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the slab is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the slab can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns a reference to the value at `ptr`, or `None` if `ptr` is null or refers to an entry
    /// that was removed
    pub fn get(&self, ptr: Ptr) -> Option<&T> {
        match self.entries.get(ptr.into_index()?)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the value at `ptr`, or `None` if `ptr` is null or refers to
    /// an entry that was removed
    pub fn get_mut(&mut self, ptr: Ptr) -> Option<&mut T> {
        match self.entries.get_mut(ptr.into_index()?)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    /// Pushes a value into the slab and returns the pointer at which it was inserted.
    ///
    /// The item may be inserted at the end of the list, or in the space from an item was previously
    /// removed.
    pub fn push(&mut self, value: T) -> Ptr {
        self.len += 1;

        // Check if we can reuse some space from the free list
        if let Some(index) = self.free_list_head.into_index() {
            let entry = mem::replace(&mut self.entries[index], Entry::Occupied(value));
            self.free_list_head = match entry {
                Entry::Vacant(next) => next,
                Entry::Occupied(_) => unreachable!("free list points at an occupied entry"),
            };

            return Ptr(index);
        }

        let index = self.entries.len();
        // Since `Ptr` reserves usize::MAX as null, it can't be a valid index into the slab
        match Ptr::new(index) {
            Some(ptr) => {
                self.entries.push(Entry::Occupied(value));
                ptr
            },
            None => panic!("cannot have more than usize::MAX - 1 entries in slab"),
        }
    }

    /// Removes an item from the slab, returning its value.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab. The space for
    /// the item will be reused in future calls to `push`. This does not move or modify any other
    /// entries in the slab.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` is null or if the entry was already removed.
    pub fn remove(&mut self, ptr: Ptr) -> T {
        let index = match ptr.into_index() {
            Some(index) => index,
            None => panic!("attempt to remove the null pointer from a slab"),
        };

        let entry = mem::replace(&mut self.entries[index], Entry::Vacant(self.free_list_head));
        match entry {
            Entry::Occupied(value) => {
                self.free_list_head = ptr;
                self.len -= 1;
                value
            },

            Entry::Vacant(next) => {
                // Put the free list back the way it was before panicking
                self.entries[index] = Entry::Vacant(next);
                panic!("attempt to remove a vacant slab entry at index {}", index)
            },
        }
    }

    /// Clears the slab, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab.
    ///
    /// This invalidates all previous pointers returned from `push`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list_head = Ptr::null();
        self.len = 0;
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the slab.
    pub fn reserve(&mut self, additional: usize) {
        // Free entries will be used before the `Vec` grows
        let free = self.entries.len() - self.len;
        self.entries.reserve(additional.saturating_sub(free))
    }

    /// Shrinks the capacity of the slab as much as possible.
    ///
    /// Free entries are only released when the slab is empty.
    pub fn shrink_to_fit(&mut self) {
        if self.len == 0 {
            self.clear();
        }
        self.entries.shrink_to_fit()
    }
}

impl<T> Index<Ptr> for Slab<T> {
    type Output = T;

    fn index(&self, ptr: Ptr) -> &T {
        match self.get(ptr) {
            Some(value) => value,
            None => panic!("invalid slab pointer: {:?}", ptr),
        }
    }
}

impl<T> IndexMut<Ptr> for Slab<T> {
    fn index_mut(&mut self, ptr: Ptr) -> &mut T {
        match self.get_mut(ptr) {
            Some(value) => value,
            None => panic!("invalid slab pointer: {:?}", ptr),
        }
    }
}
