use super::chained_hash_map::ChainedHashMap;
use super::linked_list::{self, LinkedList};

/// Deduplicated set of strings that iterates in first-insertion order.
///
/// Membership is answered by a [`ChainedHashMap`]; order is kept by a
/// [`LinkedList`]. Values are cloned into both, so callers typically store
/// `Arc<str>` handles and keep ownership of the text itself.
#[derive(Debug)]
pub struct LinkedHashSet<T> {
    index: ChainedHashMap<T>,
    order: LinkedList<T>,
}

impl<T> LinkedHashSet<T>
where
    T: AsRef<str> + Clone,
{
    pub fn new() -> Self {
        Self {
            index: ChainedHashMap::new(),
            order: LinkedList::new(),
        }
    }

    /// Adds `value` unless an equal string is already present.
    ///
    /// Returns `true` when the value was inserted.
    pub fn add(&mut self, value: T) -> bool {
        if self.index.contains_key(value.as_ref()) {
            return false;
        }
        self.index.put(value.as_ref(), value.clone());
        self.order.push_back(value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Visits values in insertion order.
    pub fn traverse<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        self.order.traverse(visit);
    }

    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.order.iter()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }
}

impl<T> Default for LinkedHashSet<T>
where
    T: AsRef<str> + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for LinkedHashSet<T>
where
    T: AsRef<str> + Clone,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for LinkedHashSet<T>
where
    T: AsRef<str> + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.add(value);
        }
        set
    }
}

impl<'a, T> IntoIterator for &'a LinkedHashSet<T>
where
    T: AsRef<str> + Clone,
{
    type Item = &'a T;
    type IntoIter = linked_list::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_add_deduplicates_and_keeps_order() {
        let mut set = LinkedHashSet::new();
        assert!(set.add("c"));
        assert!(set.add("a"));
        assert!(!set.add("c"));
        assert!(set.add("b"));
        assert!(!set.add("a"));

        assert_eq!(set.len(), 3);
        let ordered: Vec<&str> = set.iter().copied().collect();
        assert_eq!(ordered, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_repeated_add_is_idempotent() {
        let mut set = LinkedHashSet::new();
        for _ in 0..5 {
            set.add(String::from("reader"));
        }
        assert_eq!(set.len(), 1);
        assert!(set.contains("reader"));
        assert!(!set.contains("game"));
    }

    #[test]
    fn test_shared_values_are_not_copied() {
        let name: Arc<str> = Arc::from("dotfiles");
        let mut set = LinkedHashSet::new();
        set.add(Arc::clone(&name));

        let stored = set.iter().next().unwrap();
        assert!(Arc::ptr_eq(stored, &name));
    }

    #[test]
    fn test_traverse_and_clear() {
        let mut set: LinkedHashSet<&str> = ["x", "y", "x", "z"].into_iter().collect();
        let mut seen = Vec::new();
        set.traverse(|value| seen.push(*value));
        assert_eq!(seen, vec!["x", "y", "z"]);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
        assert!(set.add("x"));
    }
}
