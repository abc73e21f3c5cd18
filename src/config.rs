//! Construction parameters for a table.

use crate::error::ConfigError;
use crate::probe::ProbeSequence;
use crate::resize::ResizePolicy;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The initial capacity and load factor of a table.
///
/// The config is only checked when a table is built from it, see
/// [TableConfig::validate].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct TableConfig {
    /// Number of slots to allocate up front. Probe strategies may round this
    /// up. Must be greater than zero.
    pub initial_capacity: usize,
    /// Occupancy ratio at which the table grows. Clamped to `1.0`.
    pub load_factor: f32,
}

impl TableConfig {
    /// The load factor used when none is given.
    pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

    /// The capacity used by [TableConfig::default].
    ///
    /// This doesn't depend on the probe strategy, so it can differ from the
    /// capacity of a defaulted table, which uses
    /// [ProbeSequence::DEFAULT_CAPACITY]. Use [TableConfig::for_probe] to
    /// start from the strategy's capacity instead.
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Creates a config with the given parameters.
    pub fn new(initial_capacity: usize, load_factor: f32) -> TableConfig {
        TableConfig {
            initial_capacity,
            load_factor,
        }
    }

    /// Creates a config with the default capacity of the probe strategy `P`
    /// and the default load factor. A table built from it starts out the same
    /// as a defaulted table.
    pub fn for_probe<P: ProbeSequence>() -> TableConfig {
        TableConfig::new(P::DEFAULT_CAPACITY, Self::DEFAULT_LOAD_FACTOR)
    }

    /// Returns the config with the initial capacity set to `initial_capacity`.
    pub fn with_initial_capacity(self, initial_capacity: usize) -> TableConfig {
        TableConfig {
            initial_capacity,
            ..self
        }
    }

    /// Returns the config with the load factor set to `load_factor`.
    pub fn with_load_factor(self, load_factor: f32) -> TableConfig {
        TableConfig {
            load_factor,
            ..self
        }
    }

    /// Checks the config, returning the resize policy it describes.
    ///
    /// # Errors
    ///
    /// * [ConfigError::ZeroCapacity] if the initial capacity is zero.
    /// * [ConfigError::LoadFactor] if the load factor is negative or NaN.
    pub fn validate(&self) -> Result<ResizePolicy, ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        ResizePolicy::new(self.load_factor)
    }
}

impl Default for TableConfig {
    fn default() -> TableConfig {
        TableConfig::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_LOAD_FACTOR)
    }
}
