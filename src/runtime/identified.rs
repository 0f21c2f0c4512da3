//! Ordered collection keyed by stable identity.

use std::fmt::{Debug, Display};

/// Identity usable as a collection key and as part of a scope path.
pub trait Identity: Clone + Eq + Debug + Display + Send + Sync + 'static {}

impl<T> Identity for T where T: Clone + Eq + Debug + Display + Send + Sync + 'static {}

/// Value that carries its own identity.
pub trait Identifiable {
    type Id: Identity;

    fn id(&self) -> Self::Id;
}

/// Ordered mapping from identity to value.
///
/// Iteration follows insertion order unless the collection is re-sorted.
/// Identities are unique: inserting an existing identity replaces the value
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedVec<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for IdentifiedVec<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Identity, V> IdentifiedVec<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns `true` when `id` was not present.
    pub fn insert(&mut self, id: K, value: V) -> bool {
        match self.position(&id) {
            Some(index) => {
                self.entries[index].1 = value;
                false
            }
            None => {
                self.entries.push((id, value));
                true
            }
        }
    }

    pub fn get(&self, id: &K) -> Option<&V> {
        self.position(id).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, id: &K) -> Option<&mut V> {
        self.position(id).map(|index| &mut self.entries[index].1)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &K) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == id)
    }

    pub fn remove(&mut self, id: &K) -> Option<V> {
        self.position(id)
            .map(|index| self.entries.remove(index).1)
    }

    /// Remove every value matching `predicate`, returning how many were removed.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&V) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, value)| !predicate(value));
        before - self.entries.len()
    }

    /// Remove every entry at or after `index`, returning them in order.
    pub fn split_off(&mut self, index: usize) -> Vec<(K, V)> {
        if index >= self.entries.len() {
            return Vec::new();
        }
        self.entries.split_off(index)
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn ids(&self) -> Vec<K> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(id, value)| (id, value))
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(id, value)| (id, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(id, value)| (id, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sort_by(&mut self, mut compare: impl FnMut(&V, &V) -> std::cmp::Ordering) {
        self.entries.sort_by(|(_, a), (_, b)| compare(a, b));
    }
}

impl<V: Identifiable> IdentifiedVec<V::Id, V> {
    /// Append `value` under its own identity.
    pub fn push(&mut self, value: V) -> bool {
        self.insert(value.id(), value)
    }

    /// Append every item, later duplicates replacing earlier ones.
    pub fn extend(&mut self, values: impl IntoIterator<Item = V>) {
        for value in values {
            self.push(value);
        }
    }
}

impl<V: Identifiable> FromIterator<V> for IdentifiedVec<V::Id, V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        label: &'static str,
    }

    impl Identifiable for Item {
        type Id = u64;

        fn id(&self) -> u64 {
            self.id
        }
    }

    fn item(id: u64, label: &'static str) -> Item {
        Item { id, label }
    }

    #[test]
    fn keeps_insertion_order() {
        let items: IdentifiedVec<u64, Item> =
            [item(3, "c"), item(1, "a"), item(2, "b")].into_iter().collect();
        assert_eq!(items.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn insert_existing_replaces_in_place() {
        let mut items: IdentifiedVec<u64, Item> =
            [item(1, "a"), item(2, "b")].into_iter().collect();
        assert!(!items.push(item(1, "z")));
        assert_eq!(items.ids(), vec![1, 2]);
        assert_eq!(items.get(&1).map(|i| i.label), Some("z"));
    }

    #[test]
    fn remove_where_reports_count() {
        let mut items: IdentifiedVec<u64, Item> =
            [item(1, "a"), item(2, "b"), item(3, "a")].into_iter().collect();
        assert_eq!(items.remove_where(|i| i.label == "a"), 2);
        assert_eq!(items.ids(), vec![2]);
    }

    #[test]
    fn split_off_past_end_is_empty() {
        let mut items: IdentifiedVec<u64, Item> = [item(1, "a")].into_iter().collect();
        assert!(items.split_off(5).is_empty());
        assert_eq!(items.len(), 1);
    }
}
