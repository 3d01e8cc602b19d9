use dashmap::DashMap;
use std::hash::Hash;

/// Extension helpers for `DashMap` that avoid holding shard locks while the
/// caller does further work.
///
/// `DashMap::iter()` yields guards that hold a shard lock. Writing to a socket
/// queue or awaiting while those guards are alive can deadlock or cause
/// severe contention with concurrent inserts and removals.
///
/// These helpers clone values so the guard drops immediately.
pub trait DashMapExt<K, V> {
    /// Collect all values by cloning them (dropping guards immediately).
    fn values_cloned(&self) -> Vec<V>
    where
        V: Clone;
}

impl<K, V> DashMapExt<K, V> for DashMap<K, V>
where
    K: Eq + Hash,
{
    fn values_cloned(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|e| e.value().clone()).collect()
    }
}
