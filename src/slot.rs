//! Storage for the table's slots.

use crate::error::CapacityOverflowError;
use std::mem;

/// A single slot in the table.
///
/// A slot starts out [Slot::Empty], becomes [Slot::Occupied] when an entry is
/// placed in it and becomes a [Slot::Tombstone] when that entry is removed. A
/// tombstone can be occupied again, but never becomes empty; only a clear or a
/// resize (which allocate fresh slots) gets rid of tombstones.
#[derive(Clone, Debug)]
pub(crate) enum Slot<K, V> {
    /// The slot has never held an entry. Probe walks stop here.
    Empty,
    /// The slot held an entry which was removed. Probe walks continue past it.
    Tombstone,
    /// The slot holds an entry. A `None` key is the null key.
    Occupied { key: Option<K>, value: V },
}

/// Fixed length array of slots. The length never changes; a table which needs
/// more slots builds a new array.
#[derive(Clone)]
pub(crate) struct SlotArray<K, V> {
    slots: Box<[Slot<K, V>]>,
}

impl<K, V> SlotArray<K, V> {
    /// Creates an array of `capacity` empty slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| Slot::Empty).collect();
        SlotArray { slots }
    }

    /// Creates an array of `capacity` empty slots, returning an error rather
    /// than panicking if the slots can't be allocated.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, CapacityOverflowError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| CapacityOverflowError {
                requested: capacity,
            })?;
        slots.extend((0..capacity).map(|_| Slot::Empty));
        Ok(SlotArray {
            slots: slots.into_boxed_slice(),
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maps a normalized hash to the first slot to probe.
    #[inline]
    pub(crate) fn home_index(&self, hash: u64) -> usize {
        debug_assert!(!self.slots.is_empty());
        (hash % self.slots.len() as u64) as usize
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> &Slot<K, V> {
        &self.slots[index]
    }

    /// Returns the value in the slot at `index`, if it's occupied.
    pub(crate) fn value(&self, index: usize) -> Option<&V> {
        match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the value in the slot at `index` mutably, if it's occupied.
    pub(crate) fn value_mut(&mut self, index: usize) -> Option<&mut V> {
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Places an entry in the slot at `index`, which must not be occupied.
    pub(crate) fn occupy(&mut self, index: usize, key: Option<K>, value: V) {
        debug_assert!(!matches!(self.slots[index], Slot::Occupied { .. }));
        self.slots[index] = Slot::Occupied { key, value };
    }

    /// Replaces the value of the occupied slot at `index`, returning the old
    /// value. Returns `None` and changes nothing if the slot isn't occupied.
    pub(crate) fn replace_value(&mut self, index: usize, value: V) -> Option<V> {
        self.value_mut(index).map(|old| mem::replace(old, value))
    }

    /// Turns the occupied slot at `index` into a tombstone, returning the
    /// entry it held. Other slots are left alone and `None` is returned.
    pub(crate) fn bury(&mut self, index: usize) -> Option<(Option<K>, V)> {
        if !matches!(self.slots[index], Slot::Occupied { .. }) {
            return None;
        }

        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Slot<K, V>> {
        self.slots.iter()
    }

    /// Consumes the array, yielding every slot in order.
    pub(crate) fn into_slots(self) -> std::vec::IntoIter<Slot<K, V>> {
        self.slots.into_vec().into_iter()
    }

    /// Consumes the array, yielding the occupied entries in slot order.
    pub(crate) fn into_occupied(self) -> impl Iterator<Item = (Option<K>, V)> {
        self.into_slots().filter_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        })
    }
}
