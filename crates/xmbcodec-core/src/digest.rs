//! The `StreamingDigest` trait — the capability contract for any
//! streaming checksum or hash.
//!
//! Callers own the reset/finalize boundaries: a direct `write_byte` or
//! `write` call never resets the engine. The one exception is
//! [`StreamingDigest::digest_u32s`], which is defined as a complete
//! one-shot computation and therefore resets first.

/// A streaming checksum/hash engine.
///
/// Implementations keep a running register that is mutated by every
/// consumed byte and finalized — without mutation — by [`digest`].
///
/// [`digest`]: StreamingDigest::digest
pub trait StreamingDigest {
    /// The finalized digest value.
    type Output;

    /// Return the running register to its initial state.
    fn reset(&mut self);

    /// Consume a single byte.
    fn write_byte(&mut self, b: u8);

    /// Consume a byte range. Callers slice to express offset/length.
    ///
    /// The default implementation feeds bytes one at a time; engines
    /// with a faster bulk path should override it.
    fn write(&mut self, data: &[u8]) {
        for &b in data {
            self.write_byte(b);
        }
    }

    /// Finalize the digest over everything consumed since the last
    /// reset. Must not mutate state, so repeated calls without further
    /// writes return the same value.
    fn digest(&self) -> Self::Output;

    /// Consume a sequence of 32-bit integers, each written as four
    /// bytes in little-endian order (least-significant byte first).
    fn write_u32s(&mut self, values: &[u32]) {
        for &v in values {
            self.write(&v.to_le_bytes());
        }
    }

    /// One-shot digest over a sequence of 32-bit integers.
    ///
    /// This is the only operation that implicitly resets the engine.
    fn digest_u32s(&mut self, values: &[u32]) -> Self::Output {
        self.reset();
        self.write_u32s(values);
        self.digest()
    }
}
