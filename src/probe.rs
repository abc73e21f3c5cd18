//! Probe sequences for open addressing.
//!
//! A [ProbeSequence] decides which slot is inspected after the current one
//! when a key's home slot is taken. The table only asks for offsets, so a
//! strategy is free to use the key hash, the number of slots already probed,
//! or both. What every strategy must guarantee is *coverage*: for any
//! capacity returned by [ProbeSequence::required_capacity], a walk which starts
//! at any index and takes `capacity` steps visits every index exactly once.
//! The table relies on this but never checks it.

use crate::error::CapacityOverflowError;

/// Trait for a strategy which produces the probe sequence for a key.
pub trait ProbeSequence: Clone + Default {
    /// The capacity used when a table is created without one.
    const DEFAULT_CAPACITY: usize;

    /// Returns the offset from the current index to the next index to probe.
    ///
    /// # Arguments
    ///
    /// * `key_hash`      - The normalized hash of the key being probed for.
    /// * `probes_so_far` - The number of slots which have already been
    ///                     probed, so this is `1` for the first offset.
    fn next_offset(&self, key_hash: u64, probes_so_far: usize) -> usize;

    /// Rounds `requested` up to a capacity this strategy can cover.
    ///
    /// # Errors
    ///
    /// Returns [CapacityOverflowError] if the rounded capacity does not fit in
    /// a `usize`.
    fn required_capacity(&self, requested: usize) -> Result<usize, CapacityOverflowError>;

    /// Returns an iterator over the indices to probe for `key_hash`, starting
    /// at `start` in a table with `capacity` slots. A `start` past the end of
    /// the table wraps around.
    fn probe(&self, key_hash: u64, start: usize, capacity: usize) -> ProbeIter<'_, Self> {
        ProbeIter::new(self, key_hash, start, capacity)
    }
}

/// Rounds `requested` up to the next power of two.
fn round_to_pow2(requested: usize) -> Result<usize, CapacityOverflowError> {
    requested
        .checked_next_power_of_two()
        .ok_or(CapacityOverflowError { requested })
}

/// Linear probing: the next slot is always the adjacent one.
///
/// Any capacity is covered, so capacities are used as given.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearProbe;

impl ProbeSequence for LinearProbe {
    const DEFAULT_CAPACITY: usize = 11;

    #[inline]
    fn next_offset(&self, _key_hash: u64, _probes_so_far: usize) -> usize {
        1
    }

    fn required_capacity(&self, requested: usize) -> Result<usize, CapacityOverflowError> {
        Ok(requested)
    }
}

/// Quadratic probing over a power of two capacity.
///
/// The probe function is `f(k, i) = [h(k) + i/2 + i^2/2] mod m`, which
/// simplifies to `f(k, i) = f(k, i - 1) + i`. The visited offsets are the
/// triangular numbers, which are distinct modulo `m` when `m` is a power of
/// two, so the first `m` probes cover the whole table.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuadraticProbe;

impl ProbeSequence for QuadraticProbe {
    const DEFAULT_CAPACITY: usize = 16;

    #[inline]
    fn next_offset(&self, _key_hash: u64, probes_so_far: usize) -> usize {
        probes_so_far
    }

    fn required_capacity(&self, requested: usize) -> Result<usize, CapacityOverflowError> {
        round_to_pow2(requested)
    }
}

/// Double hashing over a power of two capacity.
///
/// The step is derived from the upper half of the key hash, which the home
/// index of small tables does not depend on, and is forced to be odd. An odd
/// step is coprime with any power of two, so the walk covers the whole table.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleHashProbe;

impl ProbeSequence for DoubleHashProbe {
    const DEFAULT_CAPACITY: usize = 16;

    #[inline]
    fn next_offset(&self, key_hash: u64, _probes_so_far: usize) -> usize {
        (key_hash.rotate_left(32) as usize) | 1
    }

    fn required_capacity(&self, requested: usize) -> Result<usize, CapacityOverflowError> {
        round_to_pow2(requested)
    }
}

/// Iterator over the indices of a probe walk.
///
/// Yields exactly `capacity` indices: the start index, and then each index
/// advanced by the strategy's next offset, wrapping around the table.
pub struct ProbeIter<'a, P> {
    strategy: &'a P,
    key_hash: u64,
    index: usize,
    capacity: usize,
    probes: usize,
}

impl<'a, P: ProbeSequence> ProbeIter<'a, P> {
    /// Creates a probe walk for `key_hash`.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The strategy which produces the offsets.
    /// * `key_hash` - The normalized hash of the key.
    /// * `start`    - The first index to yield, reduced modulo `capacity`.
    /// * `capacity` - The number of slots in the table.
    pub(crate) fn new(strategy: &'a P, key_hash: u64, start: usize, capacity: usize) -> Self {
        ProbeIter {
            strategy,
            key_hash,
            index: start.checked_rem(capacity).unwrap_or(0),
            capacity,
            probes: 0,
        }
    }
}

impl<'a, P: ProbeSequence> Iterator for ProbeIter<'a, P> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.probes >= self.capacity {
            return None;
        }

        let current = self.index;
        self.probes += 1;
        if self.probes < self.capacity {
            let step = self.strategy.next_offset(self.key_hash, self.probes) % self.capacity;
            // Same as (index + step) % capacity, but can't overflow.
            self.index = if current >= self.capacity - step {
                current - (self.capacity - step)
            } else {
                current + step
            };
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity - self.probes;
        (remaining, Some(remaining))
    }
}

impl<'a, P: ProbeSequence> ExactSizeIterator for ProbeIter<'a, P> {}
