//! A single threaded hash table which uses open addressing.
//!
//! Every entry lives directly in the table's slot array. When the slot a key
//! hashes to is taken, the table probes other slots in an order given by a
//! [ProbeSequence] until it finds the key or a slot it can use. The probe
//! strategy is a type parameter, so the probing code is monomorphized for each
//! strategy rather than dispatched at runtime. Three strategies are provided:
//!
//! | Strategy          | Next offset             | Capacities    | Default |
//! |-------------------|-------------------------|---------------|---------|
//! | [LinearProbe]     | `1`                     | any           | 11      |
//! | [QuadraticProbe]  | number of probes so far | powers of two | 16      |
//! | [DoubleHashProbe] | odd step from the hash  | powers of two | 16      |
//!
//! Each strategy visits every slot exactly once in its first `capacity`
//! probes, for every capacity it accepts, which is what lets the table probe
//! a bounded number of slots and still find every key.
//!
//! # Removal
//!
//! Removing an entry leaves a tombstone in its slot, rather than emptying it,
//! since an empty slot ends a probe walk and would hide any keys which were
//! placed after it. Inserts reuse the first tombstone on their walk, so
//! repeatedly inserting and removing keys does not use up the table.
//! Tombstones are dropped whenever the table grows or is cleared.
//!
//! # Resizing
//!
//! After an insert, if the number of entries has reached the load factor of
//! the capacity, the table doubles its capacity (rounded up as the probe
//! strategy needs) and moves every entry into the new slots. If the new
//! capacity can't be represented the insert fails with a
//! [CapacityOverflowError] and the table is left as it was. Load factors above
//! `1.0` are clamped, since a table can never hold more entries than slots.
//!
//! # Null keys
//!
//! The null key is passed as `None`, and has a hash ([NULL_KEY_HASH]) which no
//! other key can produce:
//!
//! ```
//! use openprobe::QuadraticProbeTable;
//!
//! let mut table = QuadraticProbeTable::<i32, &str>::default();
//! table.insert(None, "nothing").unwrap();
//! table.insert(0, "zero").unwrap();
//!
//! assert_eq!(table.get(None::<&i32>), Some(&"nothing"));
//! assert_eq!(table.get(&0), Some(&"zero"));
//! ```
//!
//! # Threading
//!
//! Nothing here is synchronized. A table which is shared between threads must
//! be wrapped in a lock by the caller.

pub mod config;
pub mod error;
pub mod hash;
pub mod iter;
pub mod probe;
pub mod resize;
mod slot;
pub mod table;

pub use config::TableConfig;
pub use error::{CapacityOverflowError, ConfigError};
pub use hash::{MurmurHasher, SimpleHasher, NULL_KEY_HASH};
pub use iter::{IntoIter, Iter};
pub use probe::{DoubleHashProbe, LinearProbe, ProbeIter, ProbeSequence, QuadraticProbe};
pub use resize::ResizePolicy;
pub use table::{DoubleHashTable, HashTable, LinearProbeTable, QuadraticProbeTable};
