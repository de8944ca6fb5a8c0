//! chain-hashmap: a single-threaded map from byte-string keys to owned
//! values, backed by a bucket array whose size is fixed at creation,
//! with chained collision resolution and a pluggable byte hasher.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: an embeddable associative container with O(1)-amortized
//!   operations that does not lean on a growable map type; every
//!   structural decision (bucket count, chain layout, hash) is explicit
//!   and inspectable.
//! - Layers:
//!   - hash: `mix` word scrambler, the `hash` word fold, and the
//!     `ByteHasher` strategy seam with `WordFoldHasher` as default.
//!   - ChainHashMap<V, S>: the container itself; a fixed array of chain
//!     heads over a slotmap arena of nodes, each node holding an owned
//!     key copy, the value, and the link to the next node in its chain.
//!
//! Constraints
//! - Single-threaded: no locking, no atomics; mutation requires
//!   `&mut self`, so concurrent use is serialized by the borrow rules.
//! - Capacity never changes after construction; there is no rehashing
//!   and no iteration-order guarantee.
//! - Keys are raw byte strings: the empty key and interior zero bytes
//!   are ordinary key data. The map stores its own copy of every key
//!   (or takes the buffer over via `insert_owned`).
//! - Duplicate keys accumulate as separate entries, oldest first in the
//!   chain; lookups resolve to the oldest, `remove` clears all of them,
//!   `remove_first` exactly one.
//!
//! Why a slotmap arena?
//! - Chain links are arena keys instead of owning pointers, so
//!   unlinking a node and releasing its storage is one `remove` call;
//!   there is no allocation/free pairing to get wrong and the map's
//!   `Drop` releases every node wholesale.
//! - `len` falls out of the arena: every live node is linked into
//!   exactly one chain, so the arena count is the entry count.
//!
//! Hasher invariants
//! - The hasher is injected at construction and cannot be replaced
//!   afterwards; swapping it would silently re-home every stored key.
//! - The default fold is deterministic and unkeyed; two maps with the
//!   same capacity and hasher assign every key to the same bucket.
//!
//! Notes and non-goals
//! - No resizing, no concurrency safety, no generic key types, no
//!   cryptographic collision resistance.
//! - Values are owned: releasing a value on removal is its `Drop`, and
//!   `remove`/`remove_first` hand removed values back to the caller.
//! - Public API surface is `ChainHashMap`, its iterators, and the
//!   `hash` module.

mod chain_hash_map;
mod chain_hash_map_proptest;
pub mod hash;

// Public surface
pub use chain_hash_map::{ChainHashMap, Iter, KeyValues};
pub use hash::{ByteHasher, WordFoldHasher};
