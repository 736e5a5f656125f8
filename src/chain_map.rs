use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::Index;

// Use 'fnv' for the front layer: chain keys are usually short strings or integers
use fnv::FnvBuildHasher;
use hashbrown::hash_map::Entry;
use tracing::trace;

use crate::any_map::{AnyMap, AnyMapMut};
use crate::contract;
use crate::error::Result;
use crate::layers::{self, Iter, Keys, Layered};
use crate::views::{EntrySet, KeySet, ValuesView};

/// The map type of a chain's front layer.
pub type FrontMap<K, V> = hashbrown::HashMap<K, V, FnvBuildHasher>;

/// A mutable front map chained over borrowed backing maps.
///
/// # Overview
/// * **Reads** search the front layer first, then each backing layer in the order given
///   to the constructor. The first layer holding a key supplies its value; the same key in
///   later layers is shadowed.
/// * **Writes** (`insert`, `insert_all`, `extend`) only ever touch the front layer.
/// * **Removal** deletes the key from every layer, so a shadowed value cannot resurface.
/// * **`clear`** empties every layer.
///
/// Backing layers are borrowed, not copied: changes made through the chain land in the
/// caller's maps, and the chain always reads their current contents. Layers may be of
/// different concrete types; anything implementing [`AnyMapMut`] can be stacked,
/// including another `ChainedMap` or a read-only [`ChainedView`](crate::ChainedView).
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use chain_collections::ChainedMap;
///
/// let mut defaults = HashMap::from([("color", "blue"), ("size", "m")]);
/// let mut user = HashMap::from([("size", "xl")]);
///
/// let mut chain = ChainedMap::from_maps([&mut user, &mut defaults]);
/// assert_eq!(chain.get(&"size"), Some(&"xl"));
///
/// // Writes go to the front layer only
/// assert_eq!(chain.insert("color", "red"), Some("blue"));
/// assert_eq!(chain.front().len(), 1);
/// drop(chain);
/// assert_eq!(defaults["color"], "blue");
/// ```
pub struct ChainedMap<'a, K, V> {
    /// Layer 0. Exclusively owned and the only target of insertion.
    front: FrontMap<K, V>,

    /// Layers 1.., in precedence order.
    backing: Vec<&'a mut dyn AnyMapMut<K, V>>,
}

// --- 1. Construction ---

impl<'a, K, V> ChainedMap<'a, K, V>
where
    K: Eq + Hash,
{
    /// Creates a chain with an empty front layer over `layers`.
    ///
    /// `layers` are searched in the order given, after the front layer.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = &'a mut dyn AnyMapMut<K, V>>,
    {
        Self::with_capacity(0, layers)
    }

    /// Creates a chain whose front layer has room for `capacity` entries before reallocating.
    pub fn with_capacity<I>(capacity: usize, layers: I) -> Self
    where
        I: IntoIterator<Item = &'a mut dyn AnyMapMut<K, V>>,
    {
        let backing: Vec<_> = layers.into_iter().collect();
        trace!(layers = backing.len(), capacity, "building chained map");
        Self {
            front: FrontMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default()),
            backing,
        }
    }

    /// Creates a chain over maps that all share one concrete type.
    pub fn from_maps<M, I>(maps: I) -> Self
    where
        M: AnyMapMut<K, V> + 'a,
        I: IntoIterator<Item = &'a mut M>,
    {
        Self::new(
            maps.into_iter()
                .map(|map| map as &'a mut dyn AnyMapMut<K, V>),
        )
    }

    /// Creates a chain with no backing layers. It behaves as a plain map.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Number of layers, counting the front layer.
    #[inline]
    pub fn layer_count(&self) -> usize {
        1 + self.backing.len()
    }

    /// Read-only view of the front layer: exactly what was written through this chain.
    ///
    /// Entries inherited from backing layers are not included.
    #[inline]
    pub fn front(&self) -> &FrontMap<K, V> {
        &self.front
    }

    /// Ends the chain, releasing the backing layers and returning the front layer.
    pub fn into_front(self) -> FrontMap<K, V> {
        self.front
    }
}

// --- 2. Read Path ---

impl<'a, K, V> ChainedMap<'a, K, V>
where
    K: Eq + Hash,
{
    /// Returns `true` if any layer holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        layers::contains_key(self, key)
    }

    /// Returns the value from the first layer holding `key`.
    ///
    /// A layer holding the key wins even if a later layer holds a "better" value; presence
    /// alone decides.
    pub fn get(&self, key: &K) -> Option<&V> {
        layers::get(self, key)
    }

    /// Returns the key and value from the first layer holding `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        layers::get_key_value(self, key)
    }

    /// Returns `true` if some key's effective value equals `value`.
    ///
    /// Values hidden behind a shadowing entry are not considered.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        layers::contains_value(self, value)
    }

    /// Returns the number of distinct keys across all layers.
    ///
    /// This resolves shadowing, so it walks every layer.
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

// --- 3. Write Path ---

impl<'a, K, V> ChainedMap<'a, K, V>
where
    K: Eq + Hash,
{
    /// Inserts `key -> value` into the front layer.
    ///
    /// Backing layers are never written. Returns the value `get` would have returned
    /// before the call: the front layer's old value, or a clone of the value inherited
    /// from the first backing layer holding `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        V: Clone,
    {
        match self.front.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                let inherited = self
                    .backing
                    .iter()
                    .find_map(|layer| layer.get(entry.key()))
                    .cloned();
                entry.insert(value);
                inherited
            }
        }
    }

    /// Inserts every entry into the front layer.
    pub fn insert_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        V: Clone,
    {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    /// Removes `key` from every layer that holds it.
    ///
    /// Returns the value `get` would have returned before the call. Layers that do not
    /// hold the key are not touched.
    ///
    /// Layers are changed deepest first and the front layer last. If a backing layer
    /// refuses the removal, only the layers behind it have lost the key; the failing
    /// layer still holds it and shadows them, so `get(key)` is unchanged.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        let mut previous = None;
        let mut hits = 0usize;

        for layer in self.backing.iter_mut().rev() {
            if !layer.contains_key(key) {
                continue;
            }
            // Each hit is in front of the previous ones
            if let Some(value) = layer.remove(key)? {
                previous = Some(value);
            }
            hits += 1;
        }

        if let Some(value) = self.front.remove(key) {
            previous = Some(value);
            hits += 1;
        }

        trace!(layers = hits, "removed key from chain");
        Ok(previous)
    }

    /// Removes every entry from every layer.
    ///
    /// Empty layers are skipped. Layers are cleared deepest first and the front layer
    /// last: if a backing layer refuses, the layers behind it are already empty while it
    /// and every layer in front of it (the front layer included) keep their entries.
    pub fn clear(&mut self) -> Result<()> {
        for layer in self.backing.iter_mut().rev() {
            if !layer.is_empty() {
                layer.clear()?;
            }
        }
        self.front.clear();
        trace!(layers = self.layer_count(), "cleared chain");
        Ok(())
    }
}

// --- 4. Layer Access ---

impl<K, V> Layered<K, V> for ChainedMap<'_, K, V>
where
    K: Eq + Hash,
{
    fn layer_count(&self) -> usize {
        ChainedMap::layer_count(self)
    }

    fn layer(&self, index: usize) -> Option<&dyn AnyMap<K, V>> {
        match index {
            0 => Some(&self.front as &dyn AnyMap<K, V>),
            _ => self
                .backing
                .get(index - 1)
                .map(|layer| &**layer as &dyn AnyMap<K, V>),
        }
    }
}

impl<K, V> AnyMap<K, V> for ChainedMap<'_, K, V>
where
    K: Eq + Hash,
{
    fn contains_key(&self, key: &K) -> bool {
        ChainedMap::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        ChainedMap::get(self, key)
    }

    fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        ChainedMap::get_key_value(self, key)
    }

    fn len(&self) -> usize {
        ChainedMap::len(self)
    }

    fn is_empty(&self) -> bool {
        ChainedMap::is_empty(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(ChainedMap::iter(self))
    }
}

impl<K, V> AnyMapMut<K, V> for ChainedMap<'_, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(ChainedMap::insert(self, key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        ChainedMap::remove(self, key)
    }

    fn clear(&mut self) -> Result<()> {
        ChainedMap::clear(self)
    }
}

// --- 5. Trait Implementations ---

impl<K: Eq + Hash, V> Default for ChainedMap<'_, K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Allows read access using `chain[&key]`.
///
/// # Panics
/// Panics if no layer holds the key.
impl<K: Eq + Hash, V> Index<&K> for ChainedMap<'_, K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

// Extend (putAll)
impl<K: Eq + Hash, V: Clone> Extend<(K, V)> for ChainedMap<'_, K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.insert_all(iter);
    }
}

impl<'c, K: Eq + Hash, V> IntoIterator for &'c ChainedMap<'_, K, V> {
    type Item = (&'c K, &'c V);
    type IntoIter = Iter<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Debug prints the effective entries only; layer structure stays hidden.
impl<K: Debug + Eq + Hash, V: Debug> Debug for ChainedMap<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the effective entries as `{k1=v1, k2=v2}`.
impl<K: Display + Eq + Hash, V: Display> Display for ChainedMap<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        contract::fmt_entries(f, self.iter())
    }
}

impl<K: Eq + Hash, V: Hash> Hash for ChainedMap<'_, K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        contract::hash_entries(self.iter(), state);
    }
}

impl<K: Eq + Hash, V: Eq> Eq for ChainedMap<'_, K, V> {}

// --- 6. Test Suite ---
