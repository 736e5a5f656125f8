//! # Chain Collections
//!
//! Layered maps: a mutable front map chained over any number of borrowed backing maps,
//! presented as one logical map without copying anything.
//!
//! The typical use is scoped configuration or override environments: defaults at the
//! back, narrower scopes in front, and local writes isolated to a layer the chain owns.
//!
//! ## Key Features
//!
//! * **First Layer Wins:** A lookup returns the value from the earliest layer holding the
//!   key. Later occurrences are shadowed and invisible to every read, including `len`,
//!   iteration and `contains_value`.
//! * **Isolated Writes:** `insert` only touches the chain's own front layer; backing maps
//!   are never written by insertion.
//! * **Full-Depth Removal:** `remove` deletes the key from every layer so a shadowed value
//!   can never resurface. `clear` empties every layer.
//! * **Live View:** Backing maps are borrowed, not cloned. The chain always reads their
//!   current contents and its removals land in the caller's maps.
//! * **Mixed Layer Types:** Any type implementing [`AnyMapMut`] can be a layer: `HashMap`,
//!   `BTreeMap`, `hashbrown::HashMap`, another [`ChainedMap`], or a read-only
//!   [`ChainedView`].
//! * **Map Contract:** Chains compare equal to (and hash the same as, via [`map_hash`]) any
//!   map holding the same effective entries, and print as `{k1=v1, k2=v2}`.
//!
//! ## Examples
//!
//! ### ChainedMap
//!
//! ```rust
//! use std::collections::HashMap;
//! use chain_collections::ChainedMap;
//!
//! let mut defaults = HashMap::from([("a", 1), ("b", 1), ("c", 1)]);
//! let mut site = HashMap::from([("b", 2), ("c", 2), ("d", 2)]);
//!
//! let mut chain = ChainedMap::from_maps([&mut defaults, &mut site]);
//! assert_eq!(chain.len(), 4);
//! assert_eq!(chain.get(&"c"), Some(&1));
//!
//! // Removal reaches every layer
//! assert_eq!(chain.remove(&"c"), Ok(Some(1)));
//! assert!(!chain.contains_key(&"c"));
//!
//! // Insertion stays in front
//! chain.insert("e", 5);
//! assert_eq!(chain.front().len(), 1);
//!
//! drop(chain);
//! assert!(!site.contains_key("c"));
//! assert!(!site.contains_key("e"));
//! ```
//!
//! ### ChainedView
//!
//! ```rust
//! use std::collections::HashMap;
//! use chain_collections::ChainedView;
//!
//! let env = HashMap::from([("HOME", "/root")]);
//! let fallback = HashMap::from([("HOME", "/"), ("SHELL", "sh")]);
//!
//! let view = ChainedView::from_maps([&env, &fallback]);
//! assert_eq!(view, HashMap::from([("HOME", "/root"), ("SHELL", "sh")]));
//!
//! let home = ChainedView::from_maps([&env]);
//! assert_eq!(home.to_string(), "{HOME=/root}");
//! ```

// --- Module Declarations ---

pub mod any_map;
pub mod chain_map;
pub mod contract;
pub mod error;
pub mod layers;
pub mod read_only;
pub mod set;
pub mod views;

// --- Re-exports ---

pub use any_map::{AnyMap, AnyMapMut};
pub use chain_map::{ChainedMap, FrontMap};
pub use contract::{fmt_entries, map_eq, map_hash};
pub use error::{ChainError, Result};
pub use layers::{Iter, Keys, Layered, Values};
pub use read_only::ChainedView;
pub use set::{AnySet, set_eq};
pub use views::{EntrySet, KeySet, ValuesView};
