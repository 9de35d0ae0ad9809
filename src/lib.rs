//! Ordered maps and sets backed by an AVL tree stored in a slab arena

mod slab;

pub mod map;
pub mod set;

pub use map::{AvlMap, InvariantError};
pub use set::AvlSet;

#[macro_export(local_inner_macros)]
macro_rules! avlmap {
    // trailing comma case
    ($($key:expr => $value:expr,)+) => (avlmap!($($key => $value),+));

    ( $($key:expr => $value:expr),* ) => {
        {
            let mut _map = $crate::AvlMap::new();
            $(
                let _ = _map.insert($key, $value);
            )*
            _map
        }
    };
}

#[macro_export(local_inner_macros)]
macro_rules! avlset {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(avlset!(@single $rest)),*]));

    ($($key:expr,)+) => { avlset!($($key),+) };
    ($($key:expr),*) => {
        {
            let _cap = avlset!(@count $($key),*);
            let mut _set = $crate::AvlSet::with_capacity(_cap);
            $(
                let _ = _set.insert($key);
            )*
            _set
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn avlmap_macro() {
        let map = avlmap! {
            1 => 2,
            3 => 4,
            2 => 3, // trailing comma
        };

        let pairs: Vec<(_, _)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(1, 2), (2, 3), (3, 4)]);

        // Later entries overwrite earlier ones
        let map = avlmap! {"a" => 1, "a" => 2};
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], 2);

        // No trailing comma
        let map = avlmap![3 => 4];

        let pairs: Vec<(_, _)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(3, 4)]);

        // Zero items
        let map = avlmap!();

        let pairs: Vec<(i32, i32)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[]);
    }

    #[test]
    fn avlset_macro() {
        let set = avlset! {
            1,
            3,
            2, // trailing comma
        };

        let items: Vec<_> = set.iter_inorder().copied().collect();
        assert_eq!(&items, &[1, 2, 3]);
        assert!(set.capacity() >= 3);

        // No trailing comma
        let set = avlset![99];

        let items: Vec<_> = set.iter_inorder().copied().collect();
        assert_eq!(&items, &[99]);

        // Zero items
        let set = avlset!();

        let items: Vec<i32> = set.iter_inorder().copied().collect();
        assert_eq!(&items, &[]);
    }
}
