//! Live set-like views over a chain's effective entries.
//!
//! Views borrow the chain and resolve on demand, so they always reflect the layers'
//! current contents. Building one is free; `len` walks every layer.

use std::collections::HashSet;
#[cfg(feature = "btree")]
use std::collections::BTreeSet;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};

use crate::layers::{self, Iter, Keys, Layered, Values};
use crate::set::{AnySet, set_eq};

// ==================================================================================
// 1. KeySet
// ==================================================================================

/// The union of every layer's keys, each key appearing once.
pub struct KeySet<'c, K: 'c, V: 'c> {
    stack: &'c dyn Layered<K, V>,
}

impl<'c, K, V> KeySet<'c, K, V> {
    pub(crate) fn new(stack: &'c dyn Layered<K, V>) -> Self {
        Self { stack }
    }

    /// Returns `true` if any layer holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        layers::contains_key(self.stack, key)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        layers::len(self.stack)
    }

    /// Returns `true` if no layer holds a key.
    pub fn is_empty(&self) -> bool {
        layers::is_empty(self.stack)
    }

    /// Returns an iterator visiting every distinct key in arbitrary order.
    pub fn iter(&self) -> Keys<'c, K, V> {
        Keys::new(self.stack)
    }

    // --- Set Operations ---

    /// Visits the keys that are in `self` but not in `other`.
    ///
    /// `other` can be any collection implementing `AnySet` (`HashSet`, `BTreeSet`, another `KeySet`).
    pub fn difference<'o, S>(
        &self,
        other: &'o S,
    ) -> impl Iterator<Item = &'c K> + use<'c, 'o, K, V, S>
    where
        S: AnySet<K>,
    {
        self.iter().filter(move |k| !other.contains(k))
    }

    /// Visits the keys that are both in `self` and `other`.
    pub fn intersection<'o, S>(
        &self,
        other: &'o S,
    ) -> impl Iterator<Item = &'c K> + use<'c, 'o, K, V, S>
    where
        S: AnySet<K>,
    {
        self.iter().filter(move |k| other.contains(k))
    }

    /// Returns `true` if `self` has no keys in common with `other`.
    pub fn is_disjoint<S>(&self, other: &S) -> bool
    where
        S: AnySet<K>,
    {
        self.iter().all(|k| !other.contains(k))
    }

    /// Returns `true` if every key of `self` is in `other`.
    pub fn is_subset<S>(&self, other: &S) -> bool
    where
        S: AnySet<K>,
    {
        self.iter().all(|k| other.contains(k))
    }

    /// Returns `true` if every item yielded by `other` is a key of `self`.
    pub fn is_superset<'a, I>(&self, other: I) -> bool
    where
        K: 'a,
        I: IntoIterator<Item = &'a K>,
    {
        other.into_iter().all(|k| self.contains(k))
    }
}

impl<K, V> AnySet<K> for KeySet<'_, K, V> {
    fn contains(&self, value: &K) -> bool {
        KeySet::contains(self, value)
    }

    fn len(&self) -> usize {
        KeySet::len(self)
    }

    fn is_empty(&self) -> bool {
        KeySet::is_empty(self)
    }
}

impl<K, V> Clone for KeySet<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for KeySet<'_, K, V> {}

impl<'c, K, V> IntoIterator for KeySet<'c, K, V> {
    type Item = &'c K;
    type IntoIter = Keys<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'c, K, V> IntoIterator for &KeySet<'c, K, V> {
    type Item = &'c K;
    type IntoIter = Keys<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Debug, V> Debug for KeySet<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// Key sets compare as sets, whichever chain (or plain set) they come from.
impl<K, V, W> PartialEq<KeySet<'_, K, W>> for KeySet<'_, K, V> {
    fn eq(&self, other: &KeySet<'_, K, W>) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K, V, S> PartialEq<HashSet<K, S>> for KeySet<'_, K, V>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &HashSet<K, S>) -> bool {
        set_eq(other, self)
    }
}

impl<K, V, S> PartialEq<KeySet<'_, K, V>> for HashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &KeySet<'_, K, V>) -> bool {
        set_eq(self, other)
    }
}

#[cfg(feature = "btree")]
impl<K, V> PartialEq<BTreeSet<K>> for KeySet<'_, K, V>
where
    K: Ord,
{
    fn eq(&self, other: &BTreeSet<K>) -> bool {
        set_eq(other, self)
    }
}

#[cfg(feature = "btree")]
impl<K, V> PartialEq<KeySet<'_, K, V>> for BTreeSet<K>
where
    K: Ord,
{
    fn eq(&self, other: &KeySet<'_, K, V>) -> bool {
        set_eq(self, other)
    }
}

// ==================================================================================
// 2. EntrySet
// ==================================================================================

/// One `(key, effective value)` pair per distinct key.
///
/// A key held by several layers appears once, paired with the value from the earliest
/// layer. A chain with a single layer walks that layer directly.
pub struct EntrySet<'c, K: 'c, V: 'c> {
    stack: &'c dyn Layered<K, V>,
}

impl<'c, K, V> EntrySet<'c, K, V> {
    pub(crate) fn new(stack: &'c dyn Layered<K, V>) -> Self {
        Self { stack }
    }

    /// Returns `true` if `key` is present and its effective value equals `value`.
    pub fn contains(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        layers::get(self.stack, key) == Some(value)
    }

    /// Returns the number of entries, equal to the number of distinct keys.
    pub fn len(&self) -> usize {
        layers::len(self.stack)
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        layers::is_empty(self.stack)
    }

    /// Returns an iterator over the effective entries.
    pub fn iter(&self) -> Iter<'c, K, V> {
        Iter::new(self.stack)
    }
}

impl<K, V> Clone for EntrySet<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for EntrySet<'_, K, V> {}

impl<'c, K, V> IntoIterator for EntrySet<'c, K, V> {
    type Item = (&'c K, &'c V);
    type IntoIter = Iter<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'c, K, V> IntoIterator for &EntrySet<'c, K, V> {
    type Item = (&'c K, &'c V);
    type IntoIter = Iter<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Debug, V: Debug> Debug for EntrySet<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, V: PartialEq> PartialEq for EntrySet<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.contains(k, v))
    }
}

// ==================================================================================
// 3. ValuesView
// ==================================================================================

/// The effective values, one per entry of the matching [`EntrySet`], in the same order.
///
/// Shadowed values are never visited and do not count towards `len`.
pub struct ValuesView<'c, K: 'c, V: 'c> {
    stack: &'c dyn Layered<K, V>,
}

impl<'c, K, V> ValuesView<'c, K, V> {
    pub(crate) fn new(stack: &'c dyn Layered<K, V>) -> Self {
        Self { stack }
    }

    /// Returns `true` if some effective entry holds `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        layers::contains_value(self.stack, value)
    }

    /// Returns the number of values, equal to the number of distinct keys.
    pub fn len(&self) -> usize {
        layers::len(self.stack)
    }

    /// Returns `true` if there are no values.
    pub fn is_empty(&self) -> bool {
        layers::is_empty(self.stack)
    }

    /// Returns an iterator over the effective values.
    pub fn iter(&self) -> Values<'c, K, V> {
        Values::new(self.stack)
    }
}

impl<K, V> Clone for ValuesView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for ValuesView<'_, K, V> {}

impl<'c, K, V> IntoIterator for ValuesView<'c, K, V> {
    type Item = &'c V;
    type IntoIter = Values<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'c, K, V> IntoIterator for &ValuesView<'c, K, V> {
    type Item = &'c V;
    type IntoIter = Values<'c, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V: Debug> Debug for ValuesView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ==================================================================================
// 4. Tests
// ==================================================================================
