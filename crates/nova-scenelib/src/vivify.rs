//! Maps that create their values on first access.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

/// A value that may carry no information at all.
///
/// Vivified placeholders start out vacuous; [`VivifyingMap::prune`] drops every entry whose
/// value is still vacuous after its own children have been pruned.
pub trait Vacuous {
    fn is_vacuous(&self) -> bool;

    /// Remove vacuous descendants. Leaf values have nothing to prune.
    fn prune(&mut self) {}
}

/// A map that creates a default value the first time a key is addressed with
/// [`get_vivify`](Self::get_vivify).
///
/// The factory is a plain function chosen by the owning element, so the same value type can
/// be vivified differently under different keys (a parameter is named after its index, a
/// field after its name).
///
/// Equality compares entries as an unordered map and never vivifies.
pub struct VivifyingMap<K, V> {
    entries: IndexMap<K, V>,
    factory: fn(&K) -> V,
}

impl<K, V> VivifyingMap<K, V>
where
    K: Hash + Eq,
{
    pub fn new(factory: fn(&K) -> V) -> Self {
        Self {
            entries: IndexMap::new(),
            factory,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// The value for `key`, creating and inserting it first if absent.
    ///
    /// Repeated calls with the same key return the same entry.
    pub fn get_vivify(&mut self, key: K) -> &mut V {
        let factory = self.factory;
        self.entries.entry(key).or_insert_with_key(|key| factory(key))
    }

    /// Insert `value`, replacing any existing (possibly vivified) entry.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries, vacuous or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut()
    }

    pub fn as_map(&self) -> &IndexMap<K, V> {
        &self.entries
    }

    /// A detached copy of the entries; later changes to either side are not shared.
    pub fn snapshot(&self) -> IndexMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.clone()
    }
}

impl<K, V> VivifyingMap<K, V>
where
    K: Hash + Eq,
    V: Vacuous,
{
    /// True iff every value is vacuous. A map full of placeholders is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vacuous::is_vacuous)
    }

    /// Prune every value, then rebuild the table without the ones left vacuous.
    pub fn prune(&mut self) {
        let before = self.entries.len();
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries
            .into_iter()
            .filter_map(|(key, mut value)| {
                value.prune();
                (!value.is_vacuous()).then_some((key, value))
            })
            .collect();
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::trace!(dropped, kept = self.entries.len(), "pruned vivifying map");
        }
    }
}

impl<K, V> Vacuous for VivifyingMap<K, V>
where
    K: Hash + Eq,
    V: Vacuous,
{
    fn is_vacuous(&self) -> bool {
        self.is_empty()
    }

    fn prune(&mut self) {
        VivifyingMap::prune(self);
    }
}

impl<K: Clone, V: Clone> Clone for VivifyingMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            factory: self.factory,
        }
    }
}

impl<K, V> PartialEq for VivifyingMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V> Eq for VivifyingMap<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for VivifyingMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a VivifyingMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
