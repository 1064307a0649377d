//! Fixed table of generator types.
//!
//! Each [`GeneratorType`] pins the cipher, entropy/nonce lengths, and the
//! hard cap on successful generate calls. Values outside this table are not
//! representable: there is no "unknown" variant, only a fallible parse from
//! the wire tag used on the ASN.1 wire (see `GeneratorType::from_wire_tag`).

use crate::error::DrbgError;

/// A CX generator type: a fixed (cipher, entropy length, nonce length,
/// iteration cap) tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorType {
    /// AES-128 CTR_DRBG with derivation function, 2048 identifiers.
    Aes128Ctr2048,
    /// AES-256 CTR_DRBG with derivation function, 2048 identifiers.
    Aes256Ctr2048,
}

impl GeneratorType {
    /// The INTEGER value this type is encoded as on the wire.
    pub const fn wire_tag(self) -> u32 {
        match self {
            Self::Aes128Ctr2048 => 1,
            Self::Aes256Ctr2048 => 2,
        }
    }

    /// Parse a wire tag back into a `GeneratorType`, failing on anything
    /// outside the fixed table.
    pub fn from_wire_tag(tag: u32) -> Result<Self, DrbgError> {
        match tag {
            1 => Ok(Self::Aes128Ctr2048),
            2 => Ok(Self::Aes256Ctr2048),
            other => Err(DrbgError::invalid(format!(
                "unknown generator type wire tag {other}"
            ))),
        }
    }

    /// AES key length in bytes (128 or 256 bit).
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128Ctr2048 => 16,
            Self::Aes256Ctr2048 => 32,
        }
    }

    /// Required entropy input length in bytes.
    pub const fn entropy_len(self) -> usize {
        match self {
            Self::Aes128Ctr2048 => 16,
            Self::Aes256Ctr2048 => 32,
        }
    }

    /// Required nonce length in bytes.
    pub const fn nonce_len(self) -> usize {
        match self {
            Self::Aes128Ctr2048 => 8,
            Self::Aes256Ctr2048 => 16,
        }
    }

    /// Seed length: `entropy_len + nonce_len`.
    pub const fn seed_len(self) -> usize {
        self.entropy_len() + self.nonce_len()
    }

    /// Claimed security strength in bits.
    pub const fn strength_bits(self) -> u32 {
        match self {
            Self::Aes128Ctr2048 => 128,
            Self::Aes256Ctr2048 => 256,
        }
    }

    /// Maximum number of successful generate/iterate calls before the
    /// instance is permanently exhausted.
    pub const fn max_iterations(self) -> u32 {
        2048
    }

    /// AES block size in bytes. Fixed at 16 for both variants; kept as a
    /// method rather than a free constant so call sites read uniformly
    /// alongside the other type-indexed lengths.
    pub const fn block_len(self) -> usize {
        16
    }
}
