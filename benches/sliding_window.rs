//! Sliding window - Keeps a fixed number of consecutive keys in a map while the window moves up
//! through the key space. Keys always leave from the low end and arrive at the high end, so the
//! tree is repeatedly thinned on one side and grown on the other.

use std::collections::BTreeMap;

use criterion::{
    BatchSize,
    BenchmarkGroup,
    BenchmarkId,
    Criterion,
    black_box,
    criterion_group,
    criterion_main,
    measurement::WallTime,
};

use avl::AvlMap;

trait OrderedMap<K, V> {
    fn new() -> Self;

    fn len(&self) -> usize;

    fn insert(&mut self, key: K, value: V) -> Option<V>;

    fn remove(&mut self, key: &K) -> Option<V>;

    fn pop_first(&mut self) -> Option<(K, V)>;
}

macro_rules! impl_ordered_map {
    ($name:ident) => {
        impl<K: Ord, V> OrderedMap<K, V> for $name<K, V> {
            fn new() -> Self {
                $name::new()
            }

            fn len(&self) -> usize {
                $name::len(self)
            }

            fn insert(&mut self, key: K, value: V) -> Option<V> {
                $name::insert(self, key, value)
            }

            fn remove(&mut self, key: &K) -> Option<V> {
                $name::remove(self, key)
            }

            fn pop_first(&mut self) -> Option<(K, V)> {
                $name::pop_first(self)
            }
        }
    };
}

impl_ordered_map!(BTreeMap);
impl_ordered_map!(AvlMap);

/// Creates a map holding the keys `0..window`
fn setup_window<M: OrderedMap<u64, u64>>(window: u64) -> M {
    let mut map = M::new();
    for key in 0..window {
        map.insert(key, key);
    }
    map
}

/// Moves the window up by `window` keys in steps of `batch`
///
/// Each step first removes a whole batch from the low end, then refills it at the high end. The
/// removals by key run down the left spine of the tree, which is where removal fix-ups are longest.
fn benchmark_slide<M: OrderedMap<u64, u64>>(mut map: M, window: u64, batch: u64) -> M {
    let mut low = 0;
    while low < window {
        for key in low..low + batch {
            black_box(map.remove(&key));
        }
        for key in low + window..low + window + batch {
            black_box(map.insert(key, key));
        }
        low += batch;
    }
    debug_assert_eq!(map.len(), window as usize);

    map
}

/// Same as `benchmark_slide`, but one key at a time and removing the smallest key instead of
/// searching for it
fn benchmark_queue<M: OrderedMap<u64, u64>>(mut map: M, window: u64) -> M {
    for key in window..2 * window {
        black_box(map.pop_first());
        black_box(map.insert(key, key));
    }
    debug_assert_eq!(map.len(), window as usize);

    map
}

pub fn bench_slide(c: &mut Criterion) {
    const WINDOWS: &[u64] = &[100, 500, 1000, 5000, 10000];

    #[inline(always)]
    fn bench<M: OrderedMap<u64, u64>>(
        name: &'static str,
        group: &mut BenchmarkGroup<WallTime>,
        window: &u64,
    ) {
        group.bench_with_input(BenchmarkId::new(name, window), window, |b, &window| {
            b.iter_batched(
                || setup_window::<M>(window),
                |map| benchmark_slide(map, window, (window / 4).max(1)),
                BatchSize::SmallInput,
            )
        });
    }

    let mut group = c.benchmark_group("map sliding window");
    for window in WINDOWS {
        bench::<BTreeMap<u64, u64>>("BTreeMap", &mut group, window);
        bench::<AvlMap<u64, u64>>("AvlMap", &mut group, window);
    }
    group.finish();
}

pub fn bench_queue(c: &mut Criterion) {
    const WINDOWS: &[u64] = &[100, 500, 1000, 5000, 10000];

    #[inline(always)]
    fn bench<M: OrderedMap<u64, u64>>(
        name: &'static str,
        group: &mut BenchmarkGroup<WallTime>,
        window: &u64,
    ) {
        group.bench_with_input(BenchmarkId::new(name, window), window, |b, &window| {
            b.iter_batched(
                || setup_window::<M>(window),
                |map| benchmark_queue(map, window),
                BatchSize::SmallInput,
            )
        });
    }

    let mut group = c.benchmark_group("map priority queue");
    for window in WINDOWS {
        bench::<BTreeMap<u64, u64>>("BTreeMap", &mut group, window);
        bench::<AvlMap<u64, u64>>("AvlMap", &mut group, window);
    }
    group.finish();
}

criterion_group!(benches,
    bench_slide,
    bench_queue,
);

criterion_main!(benches);
