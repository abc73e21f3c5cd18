//! Errors returned when building or growing a [crate::HashTable].

use thiserror::Error;

/// Returned when a capacity computation would not fit in a `usize`.
///
/// This happens when doubling the capacity of a full table, or when a probe
/// strategy rounds a requested capacity up (for example to the next power of
/// two) and the result overflows. The operation which triggered it has not
/// modified the table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("capacity overflow: a table of {requested} slots cannot be grown or rounded")]
pub struct CapacityOverflowError {
    /// The capacity which was being doubled or rounded.
    pub requested: usize,
}

/// Invalid construction parameters for a table.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The initial capacity must be positive.
    #[error("initial capacity must be greater than zero")]
    ZeroCapacity,
    /// The load factor was negative or NaN.
    #[error("load factor {0} must not be negative or NaN")]
    LoadFactor(f32),
    /// The probe strategy could not round the initial capacity.
    #[error(transparent)]
    CapacityOverflow(#[from] CapacityOverflowError),
}
