//==------------------------------------------------------------------------==//
//                                 openprobe
//                      Copyright (c) 2021 Rob Clucas
//      This file is distributed under the APACHE License, Version 2.0.
//                         See LICENSE for details.
//==------------------------------------------------------------------------==//

//! Module for a single threaded hash table which resolves collisions with
//! open addressing and a pluggable probe sequence.

use crate::config::TableConfig;
use crate::error::{CapacityOverflowError, ConfigError};
use crate::hash::{normalized_hash, MurmurHasher};
use crate::iter::{IntoIter, Iter};
use crate::probe::{DoubleHashProbe, LinearProbe, ProbeIter, ProbeSequence, QuadraticProbe};
use crate::resize::ResizePolicy;
use crate::slot::{Slot, SlotArray};
use std::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, Hash},
};

/// A [HashTable] which uses linear probing.
pub type LinearProbeTable<K, V> = HashTable<K, V, LinearProbe>;

/// A [HashTable] which uses quadratic probing.
pub type QuadraticProbeTable<K, V> = HashTable<K, V, QuadraticProbe>;

/// A [HashTable] which uses double hashing.
pub type DoubleHashTable<K, V> = HashTable<K, V, DoubleHashProbe>;

/// Defines where an insert into the table lands.
enum InsertSlot {
    /// The key is already in the table, at this index.
    Found(usize),
    /// The key is not in the table, and a new entry can go at this index. This
    /// is the first tombstone on the probe walk if there was one, otherwise
    /// the first empty slot.
    Vacant(usize),
    /// Every slot was probed without finding the key, an empty slot or a
    /// tombstone.
    Full,
}

/// A hash table which stores every entry directly in its slot array and
/// resolves collisions by probing other slots, in the order given by the
/// probe strategy `P`.
///
/// Removed entries leave tombstones behind so that probe walks for other keys
/// are not cut short. Tombstones are reused by later inserts and are dropped
/// when the table grows or is cleared.
///
/// Keys may be the null key, which is passed as `None`. Inserts take anything
/// which converts into an `Option<K>` and lookups anything which converts into
/// an `Option<&Q>`, so both `table.insert(5, "A")` and
/// `table.insert(None, "B")` work, as do `table.get(&5)` and
/// `table.get(None::<&i32>)`.
///
/// # Limitations
///
/// Tombstones count towards the probe walk but not towards the load factor,
/// so a table with a lot of churn and few live entries can probe further than
/// its length would suggest until it next grows or is cleared.
///
/// # Threading
///
/// This table is *not* thread-safe. Mutation needs `&mut self`, so callers
/// which share a table must provide their own exclusive lock.
///
/// # Examples
///
/// ```
/// use openprobe::LinearProbeTable;
///
/// let mut table = LinearProbeTable::<i32, &str>::new(11, 0.75).unwrap();
/// table.insert(5, "A").unwrap();
///
/// assert!(table.contains_key(&5));
/// assert_eq!(table.get(&5), Some(&"A"));
/// assert_eq!(table.remove(&5), Some("A"));
/// assert!(table.is_empty());
/// ```
pub struct HashTable<K, V, P = LinearProbe, S = BuildHasherDefault<MurmurHasher>> {
    /// The slots which store the table data.
    slots: SlotArray<K, V>,
    /// Number of occupied slots.
    len: usize,
    /// Capacity the table was created with, after rounding by the strategy.
    initial_capacity: usize,
    /// When and how much to grow.
    policy: ResizePolicy,
    /// The strategy which produces probe walks.
    strategy: P,
    /// The hasher for the table.
    hash_builder: S,
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    K: Eq + Hash,
    P: ProbeSequence,
    S: BuildHasher + Default,
{
    /// Creates a table with space for `initial_capacity` entries, which grows
    /// once it's filled to `load_factor`.
    ///
    /// The capacity is rounded up if the probe strategy needs it to be, and a
    /// load factor above `1.0` is clamped to `1.0`. A load factor of `0.0` is
    /// allowed, but then every new key doubles the table, so it is only
    /// useful for tables which stay very small.
    ///
    /// # Errors
    ///
    /// Returns a [ConfigError] if `initial_capacity` is zero, `load_factor` is
    /// negative or NaN, or the rounded capacity is too large to allocate.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - The initial number of slots in the table.
    /// * `load_factor`      - The occupancy ratio at which the table grows.
    pub fn new(initial_capacity: usize, load_factor: f32) -> Result<Self, ConfigError> {
        Self::with_config(TableConfig::new(initial_capacity, load_factor))
    }

    /// Creates a table from a [TableConfig].
    ///
    /// # Errors
    ///
    /// See [HashTable::new].
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, S::default())
    }
}

impl<K, V, P, S> HashTable<K, V, P, S>
where
    K: Eq + Hash,
    P: ProbeSequence,
    S: BuildHasher,
{
    /// Creates a table with the default capacity for the probe strategy and
    /// the default load factor, using `hash_builder` to hash keys.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_parts(
            SlotArray::with_capacity(P::DEFAULT_CAPACITY),
            ResizePolicy::default(),
            P::default(),
            hash_builder,
        )
    }

    /// Creates a table from a [TableConfig], using `hash_builder` to hash keys.
    ///
    /// # Errors
    ///
    /// See [HashTable::new].
    ///
    /// # Arguments
    ///
    /// * `config`       - The initial capacity and load factor.
    /// * `hash_builder` - The builder to create a hasher with.
    pub fn with_config_and_hasher(
        config: TableConfig,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        let policy = config.validate()?;
        let strategy = P::default();
        let capacity = strategy.required_capacity(config.initial_capacity)?;
        let slots = SlotArray::try_with_capacity(capacity)?;
        Ok(Self::from_parts(slots, policy, strategy, hash_builder))
    }

    fn from_parts(
        slots: SlotArray<K, V>,
        policy: ResizePolicy,
        strategy: P,
        hash_builder: S,
    ) -> Self {
        HashTable {
            initial_capacity: slots.capacity(),
            slots,
            len: 0,
            policy,
            strategy,
            hash_builder,
        }
    }

    /// Returns the number of entries in the table.
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the load factor at which the table grows.
    pub fn load_factor(&self) -> f32 {
        self.policy.load_factor()
    }

    /// Returns a reference to the table's [BuildHasher].
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns true if the table has an entry for the key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look for, or `None` for the null key.
    pub fn contains_key<'q, Q>(&self, key: impl Into<Option<&'q Q>>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
    {
        self.find_index(key.into()).is_some()
    }

    /// Returns a reference to the value for the key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to get the value for, or `None` for the null key.
    #[doc(alias = "find")]
    pub fn get<'q, Q>(&self, key: impl Into<Option<&'q Q>>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
    {
        let index = self.find_index(key.into())?;
        self.slots.value(index)
    }

    /// Returns a mutable reference to the value for the key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to get the value for, or `None` for the null key.
    pub fn get_mut<'q, Q>(&mut self, key: impl Into<Option<&'q Q>>) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
    {
        let index = self.find_index(key.into())?;
        self.slots.value_mut(index)
    }

    /// Returns true if any entry has a value equal to `value`.
    ///
    /// This scans every slot, so it's O(capacity).
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `None` is returned. If it
    /// did, the value is updated in place and the old value is returned.
    ///
    /// A new entry reuses the first tombstone on the key's probe walk, if
    /// there is one. If the new entry fills the table to its load factor, the
    /// table grows before this returns.
    ///
    /// # Errors
    ///
    /// Returns [CapacityOverflowError] if the table needs to grow and the new
    /// capacity can't be represented or allocated. The table is unchanged in
    /// that case.
    ///
    /// # Arguments
    ///
    /// * `key`   - The key to insert, or `None` for the null key.
    /// * `value` - The value to insert for the key.
    pub fn insert(
        &mut self,
        key: impl Into<Option<K>>,
        value: V,
    ) -> Result<Option<V>, CapacityOverflowError> {
        let key = key.into();
        match self.probe_for_insert(key.as_ref()) {
            InsertSlot::Found(index) => Ok(self.slots.replace_value(index, value)),
            InsertSlot::Vacant(index) => {
                // Allocate the new slots before touching anything, so a
                // failure leaves the table as it was.
                let capacity = self.capacity();
                let new_slots = if self.policy.should_grow(self.len + 1, capacity) {
                    let new_capacity = self.policy.grown_capacity(&self.strategy, capacity)?;
                    Some(SlotArray::try_with_capacity(new_capacity)?)
                } else {
                    None
                };

                self.slots.occupy(index, key, value);
                self.len += 1;

                if let Some(new_slots) = new_slots {
                    self.move_to_new_slots(new_slots);
                }
                Ok(None)
            }
            InsertSlot::Full => unreachable!(
                "probe walk over {} slots found no vacancy with {} entries",
                self.capacity(),
                self.len
            ),
        }
    }

    /// Updates the value for a key which is already in the table, returning
    /// the old value. If the key isn't in the table, nothing is inserted and
    /// `None` is returned.
    ///
    /// # Arguments
    ///
    /// * `key`   - The key to update, or `None` for the null key.
    /// * `value` - The new value for the key.
    #[doc(alias = "update_if_present")]
    pub fn replace<'q, Q>(&mut self, key: impl Into<Option<&'q Q>>, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
    {
        let index = self.find_index(key.into())?;
        self.slots.replace_value(index, value)
    }

    /// Removes the entry for the key, returning its value.
    ///
    /// The slot becomes a tombstone, so probe walks through it continue.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove the value for, or `None` for the null key.
    pub fn remove<'q, Q>(&mut self, key: impl Into<Option<&'q Q>>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
    {
        let index = self.find_index(key.into())?;
        let (_, value) = self.slots.bury(index)?;
        self.len -= 1;
        Some(value)
    }

    /// Removes the entry for the key only if its value is equal to `value`.
    /// Returns true if the entry was removed.
    ///
    /// # Arguments
    ///
    /// * `key`   - The key to remove, or `None` for the null key.
    /// * `value` - The value the entry must have to be removed.
    pub fn remove_if<'q, Q>(&mut self, key: impl Into<Option<&'q Q>>, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        V: PartialEq,
    {
        let index = match self.find_index(key.into()) {
            Some(index) => index,
            None => return false,
        };
        if self.slots.value(index) != Some(value) {
            return false;
        }

        let removed = self.slots.bury(index).is_some();
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Removes every entry and shrinks the table back to its initial capacity.
    pub fn clear(&mut self) {
        self.slots = SlotArray::with_capacity(self.initial_capacity);
        self.len = 0;
        tracing::trace!(capacity = self.initial_capacity, "cleared table");
    }

    /// Returns an iterator over the entries of the table, in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.slots.iter(), self.len)
    }

    /// Returns the probe walk for `hash` over the current slots.
    #[inline]
    fn probe_from(&self, hash: u64) -> ProbeIter<'_, P> {
        let capacity = self.slots.capacity();
        self.strategy.probe(hash, self.slots.home_index(hash), capacity)
    }

    /// Returns the index of the slot which holds `key`, if any.
    ///
    /// The walk stops at the first empty slot, since an insert of the key
    /// would have used it (or an earlier tombstone), or after every slot has
    /// been probed.
    fn find_index<Q>(&self, key: Option<&Q>) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.is_empty() {
            return None;
        }

        let hash = normalized_hash(&self.hash_builder, key);
        for index in self.probe_from(hash) {
            match self.slots.get(index) {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied { key: stored, .. } => {
                    if key_matches(stored.as_ref(), key) {
                        return Some(index);
                    }
                }
            }
        }
        None
    }

    /// Finds where an insert of `key` lands.
    ///
    /// The first tombstone is remembered, but the walk carries on past it,
    /// since the key may still be further along. An existing entry for the
    /// key always wins over the tombstone.
    fn probe_for_insert<Q>(&self, key: Option<&Q>) -> InsertSlot
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = normalized_hash(&self.hash_builder, key);
        let mut tombstone = None;
        for index in self.probe_from(hash) {
            match self.slots.get(index) {
                Slot::Empty => return InsertSlot::Vacant(tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    tombstone.get_or_insert(index);
                }
                Slot::Occupied { key: stored, .. } => {
                    if key_matches(stored.as_ref(), key) {
                        return InsertSlot::Found(index);
                    }
                }
            }
        }

        match tombstone {
            Some(index) => InsertSlot::Vacant(index),
            None => InsertSlot::Full,
        }
    }

    /// Moves every entry into `new_slots`, which must all be empty. The old
    /// tombstones are dropped.
    ///
    /// # Arguments
    ///
    /// * `new_slots` - The slot array to move into.
    fn move_to_new_slots(&mut self, new_slots: SlotArray<K, V>) {
        let old_capacity = self.slots.capacity();
        let capacity = new_slots.capacity();
        let old_slots = std::mem::replace(&mut self.slots, new_slots);

        for (key, value) in old_slots.into_occupied() {
            let hash = normalized_hash(&self.hash_builder, key.as_ref());
            let vacant = self
                .probe_from(hash)
                .find(|&index| matches!(self.slots.get(index), Slot::Empty));

            match vacant {
                Some(index) => self.slots.occupy(index, key, value),
                None => unreachable!(
                    "no empty slot for {} entries in a new table of {} slots",
                    self.len, capacity
                ),
            }
        }

        tracing::debug!(
            old_capacity,
            new_capacity = capacity,
            len = self.len,
            "resized table"
        );
    }
}

/// Returns true if the stored key and the key being looked for are both the
/// null key, or are both real keys which are equal.
#[inline]
fn key_matches<K, Q>(stored: Option<&K>, key: Option<&Q>) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    match (stored, key) {
        (None, None) => true,
        (Some(stored), Some(key)) => Borrow::<Q>::borrow(stored) == key,
        _ => false,
    }
}

impl<K, V, P, S> Default for HashTable<K, V, P, S>
where
    K: Eq + Hash,
    P: ProbeSequence,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, P, S> Clone for HashTable<K, V, P, S>
where
    K: Clone,
    V: Clone,
    P: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        HashTable {
            slots: self.slots.clone(),
            len: self.len,
            initial_capacity: self.initial_capacity,
            policy: self.policy,
            strategy: self.strategy.clone(),
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, P, S> fmt::Debug for HashTable<K, V, P, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(Iter::new(self.slots.iter(), self.len))
            .finish()
    }
}

impl<'a, K, V, P, S> IntoIterator for &'a HashTable<K, V, P, S>
where
    K: Eq + Hash,
    P: ProbeSequence,
    S: BuildHasher,
{
    type Item = (Option<&'a K>, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, P, S> IntoIterator for HashTable<K, V, P, S> {
    type Item = (Option<K>, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.slots, self.len)
    }
}
