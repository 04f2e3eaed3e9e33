//! Striped concurrent map for parallel score accumulation.
//!
//! The map is partitioned into a fixed number of shards chosen at
//! construction; each shard owns an ordered submap behind its own mutex.
//! Workers touching different shards never contend. Final assembly via
//! [`ConcurrentMap::build_ordinary_map`] requires that no writers run
//! concurrently with it.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// Integer key types that can be assigned to a shard.
pub trait ShardKey: Ord + Copy + sealed::Sealed {
    /// Shard index for this key: `unsigned(key) % shard_count`.
    fn shard_index(self, shard_count: usize) -> usize;
}

impl ShardKey for i32 {
    fn shard_index(self, shard_count: usize) -> usize {
        self as u32 as usize % shard_count
    }
}

impl ShardKey for i64 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self as u64 % shard_count as u64) as usize
    }
}

impl ShardKey for u32 {
    fn shard_index(self, shard_count: usize) -> usize {
        self as usize % shard_count
    }
}

impl ShardKey for u64 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self % shard_count as u64) as usize
    }
}

/// A map from integer keys to values, striped over independently locked
/// ordered submaps.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V: Default> ConcurrentMap<K, V> {
    /// Creates a map with `shard_count` shards.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    /// Locks the shard owning `key` and returns a guard over its slot,
    /// default-inserting if absent.
    ///
    /// The shard stays locked for the guard's lifetime; other shards
    /// remain accessible.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        MutexGuard::map(shard.lock(), |submap| submap.entry(key).or_default())
    }

    /// Removes `key`, locking each shard in turn.
    ///
    /// Each shard's removal is atomic; the operation as a whole is not.
    pub fn erase(&self, key: K) {
        for shard in &self.shards {
            shard.lock().remove(&key);
        }
    }

    /// Merges all shards into a single ordered map, ascending by key.
    ///
    /// Each shard is locked only while it is being copied; the caller
    /// must ensure no concurrent writers.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            for (key, value) in shard.lock().iter() {
                result.insert(*key, value.clone());
            }
        }
        result
    }
}
