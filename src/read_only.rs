use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::Index;

use tracing::debug;

use crate::any_map::{AnyMap, AnyMapMut};
use crate::contract;
use crate::error::{ChainError, Result};
use crate::layers::{self, Iter, Keys, Layered};
use crate::views::{EntrySet, KeySet, ValuesView};

/// A read-only chain over borrowed maps, with no front layer.
///
/// Reads resolve exactly like [`ChainedMap`](crate::ChainedMap): the first layer holding
/// a key supplies its value. There are no inherent mutators; mutation through
/// [`AnyMapMut`] fails with [`ChainError::Unsupported`] and leaves every layer untouched.
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use chain_collections::{AnyMapMut, ChainError, ChainedView};
///
/// let local = HashMap::from([("port", 8080)]);
/// let global = HashMap::from([("port", 80), ("workers", 4)]);
///
/// let mut view = ChainedView::from_maps([&local, &global]);
/// assert_eq!(view.get(&"port"), Some(&8080));
/// assert_eq!(view.len(), 2);
///
/// assert_eq!(
///     view.insert("port", 1),
///     Err(ChainError::Unsupported { operation: "insert" })
/// );
/// ```
pub struct ChainedView<'a, K, V> {
    layers: Vec<&'a dyn AnyMap<K, V>>,
}

impl<'a, K, V> ChainedView<'a, K, V> {
    /// Creates a view over `layers`, searched in the order given.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn AnyMap<K, V>>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Creates a view over maps that all share one concrete type.
    pub fn from_maps<M, I>(maps: I) -> Self
    where
        M: AnyMap<K, V> + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        Self::new(maps.into_iter().map(|map| map as &'a dyn AnyMap<K, V>))
    }

    /// Creates a view with no layers. It is permanently empty.
    pub fn empty() -> Self {
        Self { layers: Vec::new() }
    }

    /// Number of layers.
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if any layer holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        layers::contains_key(self, key)
    }

    /// Returns the value from the first layer holding `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        layers::get(self, key)
    }

    /// Returns the key and value from the first layer holding `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        layers::get_key_value(self, key)
    }

    /// Returns `true` if some key's effective value equals `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        layers::contains_value(self, value)
    }

    /// Returns the number of distinct keys across all layers.
    pub fn len(&self) -> usize {
        layers::len(self)
    }

    /// Returns `true` if every layer is empty.
    pub fn is_empty(&self) -> bool {
        layers::is_empty(self)
    }

    /// Iterates over the effective entries in arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Iterates over the distinct keys in arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self)
    }

    /// Live set view of the distinct keys.
    pub fn key_set(&self) -> KeySet<'_, K, V> {
        KeySet::new(self)
    }

    /// Live view of the effective entries.
    pub fn entry_set(&self) -> EntrySet<'_, K, V> {
        EntrySet::new(self)
    }

    /// Live view of the effective values, in `entry_set` order.
    pub fn values(&self) -> ValuesView<'_, K, V> {
        ValuesView::new(self)
    }
}

impl<K, V> Layered<K, V> for ChainedView<'_, K, V> {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&self, index: usize) -> Option<&dyn AnyMap<K, V>> {
        self.layers.get(index).copied()
    }
}

impl<K, V> AnyMap<K, V> for ChainedView<'_, K, V> {
    fn contains_key(&self, key: &K) -> bool {
        ChainedView::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        ChainedView::get(self, key)
    }

    fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        ChainedView::get_key_value(self, key)
    }

    fn len(&self) -> usize {
        ChainedView::len(self)
    }

    fn is_empty(&self) -> bool {
        ChainedView::is_empty(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(ChainedView::iter(self))
    }
}

// Every mutation is refused before any layer is touched.
impl<K, V> AnyMapMut<K, V> for ChainedView<'_, K, V> {
    fn insert(&mut self, _key: K, _value: V) -> Result<Option<V>> {
        debug!(operation = "insert", "rejected write to read-only chain");
        Err(ChainError::unsupported("insert"))
    }

    fn remove(&mut self, _key: &K) -> Result<Option<V>> {
        debug!(operation = "remove", "rejected write to read-only chain");
        Err(ChainError::unsupported("remove"))
    }

    fn clear(&mut self) -> Result<()> {
        debug!(operation = "clear", "rejected write to read-only chain");
        Err(ChainError::unsupported("clear"))
    }
}

impl<K, V> Clone for ChainedView<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
        }
    }
}

impl<K, V> Default for ChainedView<'_, K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Allows read access using `view[&key]`.
///
/// # Panics
/// Panics if no layer holds the key.
impl<K, V> Index<&K> for ChainedView<'_, K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<'c, K, V> IntoIterator for &'c ChainedView<'_, K, V> {
    type Item = (&'c K, &'c V);
    type IntoIter = Iter<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Debug, V: Debug> Debug for ChainedView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Display, V: Display> Display for ChainedView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        contract::fmt_entries(f, self.iter())
    }
}

impl<K: Hash, V: Hash> Hash for ChainedView<'_, K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        contract::hash_entries(self.iter(), state);
    }
}

impl<K, V: Eq> Eq for ChainedView<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_map::ChainedMap;
    use std::collections::{BTreeMap, HashMap};

    fn scopes() -> (HashMap<&'static str, i32>, HashMap<&'static str, i32>) {
        (
            HashMap::from([("a", 1), ("b", 1)]),
            HashMap::from([("b", 2), ("c", 2)]),
        )
    }

    #[test]
    fn test_reads_resolve_first_layer() {
        let (inner, outer) = scopes();
        let view = ChainedView::from_maps([&inner, &outer]);

        assert_eq!(view.layer_count(), 2);
        assert_eq!(view.get(&"b"), Some(&1));
        assert_eq!(view.get(&"c"), Some(&2));
        assert_eq!(view.get(&"z"), None);
        assert_eq!(view.get_key_value(&"c"), Some((&"c", &2)));
        assert_eq!(view.len(), 3);
        assert!(view.contains_value(&1));
        assert!(!view.contains_value(&3));

        // `b` = 2 is shadowed by the first layer
        assert_eq!(view.values().into_iter().filter(|v| **v == 2).count(), 1);
        assert_eq!(view[&"a"], 1);
    }

    #[test]
    fn test_mutations_are_refused() {
        let (inner, outer) = scopes();
        let mut view = ChainedView::from_maps([&inner, &outer]);

        assert_eq!(
            AnyMapMut::insert(&mut view, "z", 9),
            Err(ChainError::Unsupported { operation: "insert" })
        );
        assert_eq!(
            AnyMapMut::remove(&mut view, &"a"),
            Err(ChainError::Unsupported { operation: "remove" })
        );
        assert_eq!(
            AnyMapMut::clear(&mut view),
            Err(ChainError::Unsupported { operation: "clear" })
        );

        // Nothing moved
        assert_eq!(view.len(), 3);
        drop(view);
        assert_eq!(inner, HashMap::from([("a", 1), ("b", 1)]));
        assert_eq!(outer, HashMap::from([("b", 2), ("c", 2)]));
    }

    #[test]
    fn test_empty_view() {
        let view: ChainedView<i32, i32> = ChainedView::default();
        assert_eq!(view.layer_count(), 0);
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert_eq!(view.to_string(), "{}");
    }

    #[cfg(feature = "btree")]
    #[test]
    fn test_equality_and_hash_match_plain_map() {
        let (inner, outer) = scopes();
        let view = ChainedView::from_maps([&inner, &outer]);
        let flat = HashMap::from([("a", 1), ("b", 1), ("c", 2)]);

        assert_eq!(view, flat);
        assert_eq!(flat, view);
        assert_eq!(
            crate::map_hash::<&str, i32, _>(&view),
            crate::map_hash::<&str, i32, _>(&flat)
        );

        let sorted: BTreeMap<&str, i32> = flat.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(view, sorted);
        assert_eq!(sorted, view);

        let other = HashMap::from([("a", 1), ("b", 2), ("c", 2)]);
        assert_ne!(view, other);
    }

    #[cfg(feature = "btree")]
    #[test]
    fn test_mixed_layer_types() {
        let sorted: BTreeMap<i32, &str> = BTreeMap::from([(1, "btree")]);
        let brown: hashbrown::HashMap<i32, &str> = [(1, "brown"), (2, "brown")].into_iter().collect();

        let layers: [&dyn AnyMap<i32, &str>; 2] = [&sorted, &brown];
        let view = ChainedView::new(layers);
        assert_eq!(view.get(&1), Some(&"btree"));
        assert_eq!(view.get(&2), Some(&"brown"));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_view_over_chain() {
        let mut base = HashMap::from([("k", 1)]);
        let mut chain = ChainedMap::from_maps([&mut base]);
        chain.insert("local", 2);

        let view = ChainedView::from_maps([&chain]);
        assert_eq!(view.get(&"local"), Some(&2));
        assert_eq!(view.get(&"k"), Some(&1));
        assert_eq!(view, chain);
    }

    #[test]
    fn test_clone_and_debug() {
        let (inner, outer) = scopes();
        let view = ChainedView::from_maps([&inner, &outer]);
        let copy = view.clone();
        assert_eq!(copy, view);

        let single = HashMap::from([("x", 1)]);
        assert_eq!(format!("{:?}", ChainedView::from_maps([&single])), "{\"x\": 1}");
    }
}
