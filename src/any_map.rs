use std::collections::HashMap;
#[cfg(feature = "btree")]
use std::collections::BTreeMap;
use std::hash::{BuildHasher, Hash};

use crate::error::Result;

// ==================================================================================
// 1. The Interoperability Traits
// ==================================================================================

/// Read access to any key/value collection.
///
/// This is the capability a chain needs from each of its layers. It is object safe, so a
/// single chain can stack layers of different concrete types (`HashMap`, `BTreeMap`,
/// `hashbrown::HashMap`, or another chain).
///
/// Presence is always reported through `Option`; a layer holding a key maps to `Some`
/// regardless of what the stored value is.
pub trait AnyMap<K, V> {
    /// Returns `true` if the collection holds an entry for `key`.
    fn contains_key(&self, key: &K) -> bool;

    /// Returns the value stored for `key`, or `None` if there is no entry.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns the stored key and value for `key`, or `None` if there is no entry.
    fn get_key_value(&self, key: &K) -> Option<(&K, &V)>;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every entry in the collection's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;
}

/// Write access on top of [`AnyMap`].
///
/// Every method is fallible so that read-only maps can refuse mutation with
/// [`ChainError::Unsupported`](crate::ChainError::Unsupported) instead of panicking.
/// Ordinary maps always return `Ok`.
pub trait AnyMapMut<K, V>: AnyMap<K, V> {
    /// Stores `value` under `key`, returning the value it replaced.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Removes the entry for `key`, returning its value.
    fn remove(&mut self, key: &K) -> Result<Option<V>>;

    /// Removes every entry.
    fn clear(&mut self) -> Result<()>;
}

// ==================================================================================
// 2. Standard Library Maps
// ==================================================================================

impl<K, V, S> AnyMap<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        HashMap::get_key_value(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(HashMap::iter(self))
    }
}

impl<K, V, S> AnyMapMut<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(HashMap::insert(self, key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(HashMap::remove(self, key))
    }

    fn clear(&mut self) -> Result<()> {
        HashMap::clear(self);
        Ok(())
    }
}

#[cfg(feature = "btree")]
impl<K, V> AnyMap<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        BTreeMap::get_key_value(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(BTreeMap::iter(self))
    }
}

#[cfg(feature = "btree")]
impl<K, V> AnyMapMut<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(BTreeMap::insert(self, key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(BTreeMap::remove(self, key))
    }

    fn clear(&mut self) -> Result<()> {
        BTreeMap::clear(self);
        Ok(())
    }
}

// ==================================================================================
// 3. hashbrown Maps
// ==================================================================================

// The front layer of every `ChainedMap` is a hashbrown map, so this impl is always present.
impl<K, V, S> AnyMap<K, V> for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn contains_key(&self, key: &K) -> bool {
        hashbrown::HashMap::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        hashbrown::HashMap::get(self, key)
    }

    fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        hashbrown::HashMap::get_key_value(self, key)
    }

    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn is_empty(&self) -> bool {
        hashbrown::HashMap::is_empty(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(hashbrown::HashMap::iter(self))
    }
}

impl<K, V, S> AnyMapMut<K, V> for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(hashbrown::HashMap::insert(self, key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(hashbrown::HashMap::remove(self, key))
    }

    fn clear(&mut self) -> Result<()> {
        hashbrown::HashMap::clear(self);
        Ok(())
    }
}

// ==================================================================================
// 4. Tests
// ==================================================================================
