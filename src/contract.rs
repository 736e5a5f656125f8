//! Equality, hashing and rendering shared by every [`AnyMap`].
//!
//! These operate on effective entries only, so a chain and a plain map holding the same
//! associations compare equal, hash identically and print the same way.

use std::collections::HashMap;
#[cfg(feature = "btree")]
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::hash::{BuildHasher, Hash, Hasher};

use fnv::FnvHasher;

use crate::any_map::AnyMap;
use crate::chain_map::ChainedMap;
use crate::read_only::ChainedView;

/// Returns `true` if both maps hold the same key/value associations.
///
/// The maps may be of different concrete types.
pub fn map_eq<K, V, L, R>(left: &L, right: &R) -> bool
where
    L: AnyMap<K, V> + ?Sized,
    R: AnyMap<K, V> + ?Sized,
    V: PartialEq,
{
    left.len() == right.len() && left.iter().all(|(key, value)| right.get(key) == Some(value))
}

/// Order-independent content hash: the wrapping sum of one FNV hash per entry.
///
/// Maps that are equal under [`map_eq`] produce the same value whatever their type or
/// iteration order.
pub fn map_hash<K, V, M>(map: &M) -> u64
where
    M: AnyMap<K, V> + ?Sized,
    K: Hash,
    V: Hash,
{
    entries_hash(map.iter())
}

fn entries_hash<'e, K, V, I>(entries: I) -> u64
where
    K: Hash + 'e,
    V: Hash + 'e,
    I: IntoIterator<Item = (&'e K, &'e V)>,
{
    entries.into_iter().fold(0u64, |sum, (key, value)| {
        let mut hasher = FnvHasher::default();
        key.hash(&mut hasher);
        value.hash(&mut hasher);
        sum.wrapping_add(hasher.finish())
    })
}

/// Feeds the content hash of `entries` into `state`.
pub(crate) fn hash_entries<'e, K, V, I, H>(entries: I, state: &mut H)
where
    K: Hash + 'e,
    V: Hash + 'e,
    I: IntoIterator<Item = (&'e K, &'e V)>,
    H: Hasher,
{
    state.write_u64(entries_hash(entries));
}

/// Writes `entries` as `{k1=v1, k2=v2}`.
pub fn fmt_entries<'e, K, V, I>(f: &mut fmt::Formatter<'_>, entries: I) -> fmt::Result
where
    K: Display + 'e,
    V: Display + 'e,
    I: IntoIterator<Item = (&'e K, &'e V)>,
{
    f.write_str("{")?;
    for (index, (key, value)) in entries.into_iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}={value}")?;
    }
    f.write_str("}")
}

// ==================================================================================
// Equality
// ==================================================================================

// A chain equals any map holding the same effective entries.
impl<K, V, M> PartialEq<M> for ChainedMap<'_, K, V>
where
    K: Eq + Hash,
    V: PartialEq,
    M: AnyMap<K, V> + ?Sized,
{
    fn eq(&self, other: &M) -> bool {
        map_eq::<K, V, _, _>(self, other)
    }
}

impl<K, V, M> PartialEq<M> for ChainedView<'_, K, V>
where
    V: PartialEq,
    M: AnyMap<K, V> + ?Sized,
{
    fn eq(&self, other: &M) -> bool {
        map_eq::<K, V, _, _>(self, other)
    }
}

// The reverse direction, so `plain == chain` holds whenever `chain == plain` does.
macro_rules! plain_map_eq {
    ([$($params:tt)*], $plain:ty, [$($bounds:tt)*]) => {
        impl<$($params)*> PartialEq<ChainedMap<'_, K, V>> for $plain
        where
            K: Eq + Hash,
            V: PartialEq,
            $($bounds)*
        {
            fn eq(&self, other: &ChainedMap<'_, K, V>) -> bool {
                map_eq::<K, V, _, _>(self, other)
            }
        }

        impl<$($params)*> PartialEq<ChainedView<'_, K, V>> for $plain
        where
            V: PartialEq,
            $($bounds)*
        {
            fn eq(&self, other: &ChainedView<'_, K, V>) -> bool {
                map_eq::<K, V, _, _>(self, other)
            }
        }
    };
}

plain_map_eq!([K, V, S], HashMap<K, V, S>, [K: Eq + Hash, S: BuildHasher,]);
plain_map_eq!([K, V, S], hashbrown::HashMap<K, V, S>, [K: Eq + Hash, S: BuildHasher,]);
#[cfg(feature = "btree")]
plain_map_eq!([K, V], BTreeMap<K, V>, [K: Ord,]);
