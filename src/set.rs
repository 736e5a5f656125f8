#[cfg(feature = "btree")]
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

// ==================================================================================
// 1. The Interoperability Trait
// ==================================================================================

/// A trait for any collection that supports efficient containment checks.
///
/// This allows a chain's [`KeySet`](crate::KeySet) to perform set operations (like
/// `difference` or `is_subset`) against standard library sets (`HashSet`, `BTreeSet`) and
/// hashbrown sets without converting them first.
pub trait AnySet<T> {
    /// Returns `true` if the collection contains the value.
    fn contains(&self, value: &T) -> bool;

    /// Returns the number of distinct values in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Support standard HashSet
impl<T, S> AnySet<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

// Support standard BTreeSet
#[cfg(feature = "btree")]
impl<T> AnySet<T> for BTreeSet<T>
where
    T: Ord,
{
    fn contains(&self, value: &T) -> bool {
        BTreeSet::contains(self, value)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

// Support hashbrown HashSet
impl<T, S> AnySet<T> for hashbrown::HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn contains(&self, value: &T) -> bool {
        hashbrown::HashSet::contains(self, value)
    }

    fn len(&self) -> usize {
        hashbrown::HashSet::len(self)
    }
}

/// Returns `true` if both sets hold exactly the same values.
///
/// The sets may be of different concrete types.
pub fn set_eq<T, A, B>(left: &A, right: &B) -> bool
where
    A: AnySet<T> + ?Sized,
    B: AnySet<T> + ?Sized,
    for<'x> &'x A: IntoIterator<Item = &'x T>,
{
    left.len() == right.len() && left.into_iter().all(|value| right.contains(value))
}

// ==================================================================================
// 2. Tests
// ==================================================================================
