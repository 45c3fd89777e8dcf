//! Free-range bookkeeping for memory managers.
//!
//! This crate keeps track of a collection of disjoint, half-open address
//! ranges `[base, limit)` that some pool or arena has released, coalescing
//! neighbouring ranges as they are inserted and splitting blocks when a
//! sub-range is taken back out. A `max_size` subtree statistic on the
//! backing search tree makes first-fit, last-fit and largest-fit queries
//! logarithmic.
//!
//! The index records metadata only: it never touches the memory the
//! addresses refer to, and it performs no synchronisation. Callers that
//! share a store across threads must wrap it in their own lock.

pub mod freelist;
