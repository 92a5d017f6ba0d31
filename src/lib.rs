//! chain-hashset: an unordered set built on separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a plain value-semantics hash set whose layout (buckets, chains,
//!   growth) is explicit and observable, in layers that can be reasoned
//!   about on their own.
//! - Layers:
//!   - ChainTable<K, S, N>: the bucket array, the node arena and the
//!     growth/rehash policy. Links, unlinks and finds without any
//!     duplicate checking.
//!   - ChainSet<K, S, N>: public façade. Duplicate-checked insertion, bulk
//!     insertion, copy/assign, set equality, and the debug dump.
//!   - Iter<'a, K>: a forward cursor over (bucket, node) that borrows the
//!     table, built by the façade but walking the chains on its own.
//!
//! Constraints
//! - Single-threaded: no locking or atomics. The set is `Send` but not
//!   `Sync`.
//! - Unique keys; a repeated insert reports `false` and changes nothing.
//! - `N >= 1` buckets at all times; checked when the type is used.
//! - After any insertion, `len / bucket_count <= max_load_factor`.
//!
//! Chains and node ownership
//! - Nodes live in a generational `slotmap::SlotMap`; a chain is a list of
//!   `NodeKey`s threaded through `Node::next`, newest first. Clearing,
//!   unlinking and dropping the set all release nodes through the arena.
//! - A rehash drops every node and links its key again into a fresh
//!   bucket array, so node identities never survive a rehash. Iterators
//!   borrow the set and cannot be held across one.
//!
//! Growth
//! - Before linking a new key the table reserves room for `len + 1` keys.
//!   When that exceeds the bound, the bucket count steps through
//!   `n * 2 + 1` until it fits, then the table rehashes once.
//! - Bulk insertion reserves per key, not per batch.
//! - The table never shrinks; `clear` keeps the bucket count.
//!
//! Reentrancy
//! - `Hash` and `Eq` run while a chain is probed. Each public entry point
//!   holds a debug-only guard, so a key that calls back into its own set
//!   panics in debug builds instead of observing a half-updated table.
//!
//! Non-goals
//! - No concurrent access, persistence, custom allocators, ordered
//!   iteration or shrinking.

mod error;
mod iter;
mod reentrancy;
mod set;
mod set_proptest;
mod table;

// Public surface
pub use error::SetError;
pub use hashbrown::hash_map::DefaultHashBuilder;
pub use iter::{IntoIter, Iter};
pub use set::{ChainSet, DEFAULT_MAX_LOAD_FACTOR, DEFAULT_MIN_BUCKETS};
