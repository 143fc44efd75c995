//! Table-driven CRC64 engine.
//!
//! With the default key this computes CRC-64/XZ: reflected ECMA-182
//! polynomial, register initialized to all ones, digest is the bitwise
//! complement of the register. The container format uses it as a fast,
//! non-cryptographic content fingerprint for string identity and
//! deduplication.

use crate::digest::StreamingDigest;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Reflected ECMA-182 polynomial — the default key.
pub const DEFAULT_KEY: u64 = 0xC96C_5795_D787_0F42;

/// Lookup table for the default key, built once per process and shared
/// read-only by every default-key engine.
static DEFAULT_TABLE: Lazy<Arc<[u64; 256]>> = Lazy::new(|| Arc::new(build_table(DEFAULT_KEY)));

/// Build the 256-entry lookup table for a polynomial key.
///
/// For each byte value: seed the working register with the value, then
/// run eight rounds of shift-right, XORing in the key whenever the low
/// bit was set. Deterministic for a given key.
fn build_table(key: u64) -> [u64; 256] {
    let mut table = [0u64; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut r = i as u64;
        for _ in 0..8 {
            if r & 1 != 0 {
                r = (r >> 1) ^ key;
            } else {
                r >>= 1;
            }
        }
        *entry = r;
    }
    table
}

/// A streaming CRC64 engine.
///
/// The lookup table is immutable after construction and shared behind
/// an `Arc`; the running register is exclusively owned by this engine
/// and never shared. [`Crc64::fork`] creates a sibling engine over the
/// same table allocation with a freshly reset register.
pub struct Crc64 {
    table: Arc<[u64; 256]>,
    value: u64,
}

impl Crc64 {
    /// Engine with the default key. All default-key engines share one
    /// process-wide table allocation.
    pub fn new() -> Self {
        Self {
            table: Arc::clone(&DEFAULT_TABLE),
            value: u64::MAX,
        }
    }

    /// Engine with an explicit polynomial key. Builds a fresh table.
    pub fn with_key(key: u64) -> Self {
        Self {
            table: Arc::new(build_table(key)),
            value: u64::MAX,
        }
    }

    /// Sibling engine: shares this engine's lookup table allocation,
    /// starts with its own independently reset register. Resetting or
    /// writing to either engine never affects the other.
    pub fn fork(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            value: u64::MAX,
        }
    }

    /// One-shot digest of a byte slice with the default key.
    ///
    /// Builds a caller-local engine; there is no shared mutable
    /// convenience instance, so this is safe to call concurrently.
    pub fn checksum(data: &[u8]) -> u64 {
        let mut crc = Crc64::new();
        crc.write(data);
        crc.digest()
    }

    /// One-shot digest of a string's bytes with the default key.
    /// For ASCII input this matches the digest of the ASCII encoding.
    pub fn checksum_str(s: &str) -> u64 {
        Self::checksum(s.as_bytes())
    }
}

impl Default for Crc64 {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingDigest for Crc64 {
    type Output = u64;

    fn reset(&mut self) {
        self.value = u64::MAX;
    }

    fn write_byte(&mut self, b: u8) {
        self.value = self.table[((self.value as u8) ^ b) as usize] ^ (self.value >> 8);
    }

    fn write(&mut self, data: &[u8]) {
        let mut value = self.value;
        for &b in data {
            value = self.table[((value as u8) ^ b) as usize] ^ (value >> 8);
        }
        self.value = value;
    }

    fn digest(&self) -> u64 {
        self.value ^ u64::MAX
    }
}
