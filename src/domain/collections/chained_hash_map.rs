//! String-keyed map with separate chaining and a fixed bucket count.
//!
//! The table never grows. Past the nominal load factor lookups degrade to a
//! linear scan of longer chains; entries are never lost or reordered within
//! a chain. Iteration order across buckets is unspecified.

use std::fmt;

/// Bucket count used by [`ChainedHashMap::new`].
pub const DEFAULT_BUCKET_COUNT: usize = 101;

/// Load factor above which lookups stop being close to O(1).
pub const NOMINAL_LOAD_FACTOR: f64 = 0.75;

struct Entry<V> {
    key: Box<str>,
    value: V,
    next: Option<Box<Entry<V>>>,
}

type Link<V> = Option<Box<Entry<V>>>;

pub struct ChainedHashMap<V> {
    buckets: Vec<Link<V>>,
    len: usize,
}

/// Polynomial rolling hash, `h = h * 31 + byte`, reduced to a bucket index.
fn bucket_index(key: &str, bucket_count: usize) -> usize {
    let hash = key
        .bytes()
        .fold(0u32, |h, byte| h.wrapping_mul(31).wrapping_add(u32::from(byte)));
    hash as usize % bucket_count
}

impl<V> ChainedHashMap<V> {
    pub fn new() -> Self {
        Self::with_bucket_count(DEFAULT_BUCKET_COUNT)
    }

    /// Creates a map with `bucket_count` chains (at least one).
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);
        Self { buckets, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let mut cursor = self.buckets[self.index_of(key)].as_deref();
        while let Some(entry) = cursor {
            if &*entry.key == key {
                return Some(&entry.value);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.index_of(key);
        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(entry) = cursor {
            if &*entry.key == key {
                return Some(&mut entry.value);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`.
    ///
    /// An existing entry is overwritten in place and its previous value is
    /// handed back. A new key is copied into an entry placed at the head of
    /// its chain.
    pub fn put(&mut self, key: &str, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(key) {
            return Some(std::mem::replace(slot, value));
        }

        let index = self.index_of(key);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry {
            key: Box::from(key),
            value,
            next,
        }));
        self.len += 1;
        None
    }

    /// Detaches the entry for `key` from its chain and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.index_of(key);
        let position =
            Chain(self.buckets[index].as_deref()).position(|entry| &*entry.key == key)?;

        let mut link = &mut self.buckets[index];
        for _ in 0..position {
            link = &mut link.as_mut()?.next;
        }
        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len -= 1;
        Some(removed.value)
    }

    /// Every key currently stored, in no particular order.
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Visits every entry once; within a chain the newest entry comes first.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
        }
    }

    /// Drops every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
        self.len = 0;
    }

    fn index_of(&self, key: &str) -> usize {
        bucket_index(key, self.buckets.len())
    }
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for ChainedHashMap<V> {
    fn drop(&mut self) {
        // Long chains would otherwise drop recursively.
        self.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

struct Chain<'a, V>(Option<&'a Entry<V>>);

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.0?;
        self.0 = entry.next.as_deref();
        Some(entry)
    }
}

/// Iterator over `(key, value)` pairs of a [`ChainedHashMap`].
pub struct Iter<'a, V> {
    buckets: std::slice::Iter<'a, Link<V>>,
    chain: Option<&'a Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                return Some((&*entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_keys_consistent<V>(map: &ChainedHashMap<V>) {
        let keys = map.keys();
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(keys.len(), map.len());
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_put_and_get() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.put("strawberry", 1), None);
        assert_eq!(map.put("reader", 2), None);

        assert_eq!(map.get("strawberry"), Some(&1));
        assert_eq!(map.get("reader"), Some(&2));
        assert_eq!(map.get("game"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_put_existing_key_overwrites_in_place() {
        let mut map = ChainedHashMap::new();
        map.put("w1", "/p");
        assert_eq!(map.put("w1", "/p2"), Some("/p"));
        assert_eq!(map.get("w1"), Some(&"/p2"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_key_is_copied() {
        let mut map = ChainedHashMap::new();
        let mut buffer = String::from("alias");
        map.put(&buffer, 7);
        buffer.clear();
        buffer.push_str("other");
        assert_eq!(map.get("alias"), Some(&7));
        assert!(!map.contains_key("other"));
    }

    #[test]
    fn test_bucket_index_uses_rolling_hash() {
        // 'a' = 97, 'b' = 98: 97 * 31 + 98 = 3105
        assert_eq!(bucket_index("ab", DEFAULT_BUCKET_COUNT), 3105 % 101);
        assert_eq!(bucket_index("", DEFAULT_BUCKET_COUNT), 0);
    }

    #[test]
    fn test_collisions_share_a_chain() {
        let mut map = ChainedHashMap::with_bucket_count(1);
        map.put("first", 1);
        map.put("second", 2);
        map.put("third", 3);

        // newest entry sits at the chain head
        assert_eq!(map.keys(), vec!["third", "second", "first"]);

        assert_eq!(map.remove("second"), Some(2));
        assert_eq!(map.keys(), vec!["third", "first"]);
        assert_eq!(map.remove("first"), Some(1));
        assert_eq!(map.remove("third"), Some(3));
        assert!(map.is_empty());
        assert_eq!(map.remove("third"), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainedHashMap::with_bucket_count(3);
        map.put("count", 1);
        if let Some(value) = map.get_mut("count") {
            *value += 41;
        }
        assert_eq!(map.get("count"), Some(&42));
        assert!(map.get_mut("missing").is_none());
    }

    #[test]
    fn test_no_resize_beyond_load_factor() {
        let mut map = ChainedHashMap::with_bucket_count(4);
        for i in 0..100 {
            map.put(&format!("key{i}"), i);
        }
        assert_eq!(map.bucket_count(), 4);
        assert!(map.load_factor() > NOMINAL_LOAD_FACTOR);
        for i in 0..100 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
        assert_keys_consistent(&map);
    }

    #[test]
    fn test_size_matches_keys_under_mixed_operations() {
        let mut map = ChainedHashMap::with_bucket_count(7);
        for round in 0..5 {
            for i in 0..20 {
                map.put(&format!("p{}", (i * 3 + round) % 25), i);
                assert_keys_consistent(&map);
            }
            for i in (0..25).step_by(round + 2) {
                map.remove(&format!("p{i}"));
                assert_keys_consistent(&map);
            }
        }
    }

    #[test]
    fn test_traverse_visits_every_entry_once() {
        let mut map = ChainedHashMap::new();
        for name in ["a", "b", "c", "d"] {
            map.put(name, name.len());
        }
        let mut visited = Vec::new();
        map.traverse(|key, _| visited.push(key.to_string()));
        visited.sort();
        assert_eq!(visited, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_clear_keeps_buckets() {
        let mut map = ChainedHashMap::with_bucket_count(2);
        for i in 0..10 {
            map.put(&i.to_string(), i);
        }
        map.clear();
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
        assert_eq!(map.bucket_count(), 2);
        map.put("again", 1);
        assert_eq!(map.get("again"), Some(&1));
    }
}
