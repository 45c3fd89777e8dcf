//! Coalescing free-range index
//!
//! This module tracks disjoint half-open address ranges `[base, limit)`,
//! merging neighbours on insert and splitting blocks on partial delete,
//! with logarithmic best-fit queries over a size-augmented search tree.

mod pool;
pub mod store;
pub mod tree;

// Re-export public types for convenience
pub use store::{
  Callbacks, FindDelete, FreeStore, FreeStoreError, IntegrityError, NotifyFn, StoreOptions,
};
pub use tree::{Blocks, Extent};

/// Address into the managed space; opaque to the index.
pub type Addr = usize;
/// Unit count derived from a pair of addresses.
pub type Size = usize;
