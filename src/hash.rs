//! Key hashing for the table.
//!
//! Every key is reduced to a `u64` by a [BuildHasher] and then normalized so
//! that the top bit is clear. The value with only the top bit set,
//! [NULL_KEY_HASH], is reserved for the null key, so the null key can never
//! share a hash with a real key.

use std::hash::{BuildHasher, Hash, Hasher};

/// The hash reserved for the null key. No real key normalizes to this value.
pub const NULL_KEY_HASH: u64 = 1 << 63;

/// Mask which clears the bit reserved for the null key.
const REAL_KEY_MASK: u64 = !NULL_KEY_HASH;

/// Creates the normalized hash of `key` using a hasher built from `hash_builder`.
///
/// A `None` key is the null key and always hashes to [NULL_KEY_HASH]. Any
/// other key hashes into `[0, 2^63)`.
///
/// # Arguments
///
/// * `hash_builder` - The builder to build the hasher with.
/// * `key`          - The key to hash, or `None` for the null key.
pub fn normalized_hash<Q, S>(hash_builder: &S, key: Option<&Q>) -> u64
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    match key {
        None => NULL_KEY_HASH,
        Some(key) => {
            let mut hasher = hash_builder.build_hasher();
            key.hash(&mut hasher);
            hasher.finish() & REAL_KEY_MASK
        }
    }
}

/// Loads up to eight bytes from `buf` as a little endian u64. Missing bytes
/// are zero.
#[inline]
fn load_u64_le(buf: &[u8]) -> u64 {
    let mut data = [0u8; 8];
    let len = buf.len().min(8);
    data[..len].copy_from_slice(&buf[..len]);
    u64::from_le_bytes(data)
}

/// Implementation of a hasher which hashes using the murmur3 finalizer.
///
/// Each 8 byte chunk which is written is folded into the running state, so
/// keys which write more than one word (strings, tuples) hash all of their
/// bytes.
#[derive(Default)]
pub struct MurmurHasher(u64);

impl MurmurHasher {
    #[inline]
    fn mix(mut v: u64) -> u64 {
        v ^= v >> 33;
        v = v.wrapping_mul(0xff51afd7ed558ccd);
        v ^= v >> 33;
        v = v.wrapping_mul(0xc4ceb9fe1a85ec53);
        v ^= v >> 33;
        v
    }
}

impl Hasher for MurmurHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            self.0 = Self::mix(self.0.rotate_left(31) ^ load_u64_le(chunk));
        }
    }
}

// This is not really a hasher, it just returns the last word which was
// written. It makes slot placement predictable for integer keys, and can be
// useful if the keys are known to be well distributed already.
#[derive(Default)]
pub struct SimpleHasher(u64);

impl Hasher for SimpleHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        if let Some(last) = bytes.chunks(8).last() {
            *self = SimpleHasher(load_u64_le(last));
        }
    }
}
