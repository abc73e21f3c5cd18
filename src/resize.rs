//! Growth policy for the table.

use crate::config::TableConfig;
use crate::error::{CapacityOverflowError, ConfigError};
use crate::probe::ProbeSequence;

/// Decides when a table grows and what capacity it grows to.
///
/// A table grows after an insertion leaves it at or above the load factor.
/// The new capacity is double the old one, rounded up by the probe strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePolicy {
    load_factor: f32,
}

impl ResizePolicy {
    /// The largest load factor an open addressing table can use.
    pub const MAX_LOAD_FACTOR: f32 = 1.0;

    /// Creates a policy with the given maximum load factor.
    ///
    /// Load factors above [Self::MAX_LOAD_FACTOR] are clamped to it, since
    /// the table can never hold more entries than it has slots. A load factor
    /// of `0.0` is accepted and grows the table on every new key, doubling
    /// it each time, so a few dozen inserts exhaust memory.
    ///
    /// # Errors
    ///
    /// Returns [ConfigError::LoadFactor] if `load_factor` is negative or NaN.
    pub fn new(load_factor: f32) -> Result<ResizePolicy, ConfigError> {
        if load_factor.is_nan() || load_factor < 0.0 {
            return Err(ConfigError::LoadFactor(load_factor));
        }

        Ok(ResizePolicy {
            load_factor: load_factor.min(Self::MAX_LOAD_FACTOR),
        })
    }

    /// Returns the (clamped) load factor.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns true if a table holding `len` entries in `capacity` slots has
    /// reached the load factor.
    pub fn should_grow(&self, len: usize, capacity: usize) -> bool {
        len as f64 / capacity as f64 >= self.load_factor as f64
    }

    /// Returns the capacity a table of `capacity` slots grows to.
    ///
    /// # Errors
    ///
    /// Returns [CapacityOverflowError] if doubling `capacity`, or rounding the
    /// doubled capacity for `strategy`, overflows.
    pub fn grown_capacity<P: ProbeSequence>(
        &self,
        strategy: &P,
        capacity: usize,
    ) -> Result<usize, CapacityOverflowError> {
        let doubled = capacity
            .checked_mul(2)
            .ok_or(CapacityOverflowError {
                requested: capacity,
            })?;
        strategy.required_capacity(doubled)
    }
}

impl Default for ResizePolicy {
    fn default() -> ResizePolicy {
        ResizePolicy {
            load_factor: TableConfig::DEFAULT_LOAD_FACTOR,
        }
    }
}
