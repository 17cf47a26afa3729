//! Shared type aliases for the unitpack crate
//!
//! Determinism is a hard requirement of the packer: identical inputs must
//! produce byte-identical output, so every set-like accumulation uses
//! insertion-ordered containers instead of hash-ordered ones.

use std::hash::BuildHasherDefault;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

/// Type alias for IndexMap with FxHasher for better performance
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
/// Type alias for IndexSet with FxHasher for better performance
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
