//! Shadow resolution over an ordered stack of map layers.
//!
//! Every read a chain answers goes through the functions here. Layer `0` is searched
//! first; a key found in layer `i` hides the same key in every layer after `i`.

use crate::any_map::AnyMap;

/// An ordered stack of map layers, searched front to back.
///
/// Implemented by [`ChainedMap`](crate::ChainedMap) (front layer first, then the backing
/// layers) and [`ChainedView`](crate::ChainedView) (backing layers only).
pub trait Layered<K, V> {
    /// Number of layers in the stack, including any front layer.
    fn layer_count(&self) -> usize;

    /// The layer at `index`, or `None` past the end of the stack.
    fn layer(&self, index: usize) -> Option<&dyn AnyMap<K, V>>;
}

// --- 1. Point Queries ---

fn layers<'c, K, V>(
    stack: &'c dyn Layered<K, V>,
) -> impl Iterator<Item = &'c dyn AnyMap<K, V>> {
    (0..stack.layer_count()).filter_map(move |index| stack.layer(index))
}

/// Returns `true` if a layer in front of `depth` also holds `key`.
fn is_shadowed<K, V>(stack: &dyn Layered<K, V>, depth: usize, key: &K) -> bool {
    (0..depth)
        .filter_map(|index| stack.layer(index))
        .any(|layer| layer.contains_key(key))
}

pub(crate) fn contains_key<K, V>(stack: &dyn Layered<K, V>, key: &K) -> bool {
    layers(stack).any(|layer| layer.contains_key(key))
}

/// The entry from the first layer holding `key`.
///
/// Presence is decided by the layer's own lookup, so a layer that holds the key wins
/// whatever value it stores.
pub(crate) fn get_key_value<'c, K, V>(
    stack: &'c dyn Layered<K, V>,
    key: &K,
) -> Option<(&'c K, &'c V)> {
    layers(stack).find_map(|layer| layer.get_key_value(key))
}

pub(crate) fn get<'c, K, V>(stack: &'c dyn Layered<K, V>, key: &K) -> Option<&'c V> {
    layers(stack).find_map(|layer| layer.get(key))
}

pub(crate) fn contains_value<K, V>(stack: &dyn Layered<K, V>, value: &V) -> bool
where
    V: PartialEq,
{
    Iter::new(stack).any(|(_, candidate)| candidate == value)
}

pub(crate) fn is_empty<K, V>(stack: &dyn Layered<K, V>) -> bool {
    layers(stack).all(|layer| layer.is_empty())
}

/// Number of distinct keys across every layer.
pub(crate) fn len<K, V>(stack: &dyn Layered<K, V>) -> usize {
    match stack.layer_count() {
        0 => 0,
        1 => stack.layer(0).map_or(0, |layer| layer.len()),
        _ => Iter::new(stack).count(),
    }
}

// --- 2. Iterators ---

/// Iterator over the effective entries of a chain.
///
/// Each layer is walked in its own order; entries whose key also lives in an earlier
/// layer are skipped, so every key is yielded exactly once with its effective value.
pub struct Iter<'c, K: 'c, V: 'c> {
    stack: &'c dyn Layered<K, V>,
    depth: usize,
    entries: Option<Box<dyn Iterator<Item = (&'c K, &'c V)> + 'c>>,
}

impl<'c, K, V> Iter<'c, K, V> {
    pub(crate) fn new(stack: &'c dyn Layered<K, V>) -> Self {
        Self {
            stack,
            depth: 0,
            entries: None,
        }
    }
}

impl<'c, K, V> Iterator for Iter<'c, K, V> {
    type Item = (&'c K, &'c V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entries) = &mut self.entries {
                let (stack, depth) = (self.stack, self.depth);
                if let Some(entry) = entries.find(|(key, _)| !is_shadowed(stack, depth, key)) {
                    return Some(entry);
                }
                self.entries = None;
                self.depth += 1;
            }
            let layer = self.stack.layer(self.depth)?;
            self.entries = Some(layer.iter());
        }
    }
}

/// Iterator over the distinct keys of a chain.
pub struct Keys<'c, K: 'c, V: 'c> {
    inner: Iter<'c, K, V>,
}

impl<'c, K, V> Keys<'c, K, V> {
    pub(crate) fn new(stack: &'c dyn Layered<K, V>) -> Self {
        Self {
            inner: Iter::new(stack),
        }
    }
}

impl<'c, K, V> Iterator for Keys<'c, K, V> {
    type Item = &'c K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// Iterator over the effective values of a chain, in [`Iter`] order.
pub struct Values<'c, K: 'c, V: 'c> {
    inner: Iter<'c, K, V>,
}

impl<'c, K, V> Values<'c, K, V> {
    pub(crate) fn new(stack: &'c dyn Layered<K, V>) -> Self {
        Self {
            inner: Iter::new(stack),
        }
    }
}

impl<'c, K, V> Iterator for Values<'c, K, V> {
    type Item = &'c V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

// --- 3. Tests ---
