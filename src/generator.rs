//! Contact Identifier generator: a thin, bounded layer over the CTR_DRBG
//! that emits RFC 4122 version-4 UUIDs.

use cx_drbg::{Drbg, GeneratorType};
use uuid::Uuid;

use crate::error::CxError;

/// One RFC 4122 version-4 UUID drawn from a bounded, deterministic
/// generator. Byte 6's high nibble is forced to `0x4` and byte 8's top two
/// bits are forced to `0b10`, matching the version/variant invariants; the
/// remaining 122 bits come directly from the underlying DRBG.
pub type ContactIdentifier = Uuid;

/// A bounded Contact Identifier generator. Exclusively owns its DRBG:
/// dropping the generator drops the DRBG.
pub struct Generator {
    drbg: Drbg,
}

impl Generator {
    /// Wrap an already-instantiated DRBG. The generator takes ownership;
    /// the DRBG's remaining budget becomes the generator's remaining
    /// identifier budget.
    pub fn new(drbg: Drbg) -> Self {
        Self { drbg }
    }

    /// Instantiate a generator directly from a seed (`entropy || nonce` of
    /// length `seed_len(type)`), with no personalization string.
    pub fn from_seed(gen_type: GeneratorType, seed: &[u8]) -> Result<Self, CxError> {
        let drbg = Drbg::instantiate(gen_type, seed, None)?;
        Ok(Self::new(drbg))
    }

    /// The generator type this instance was built for.
    pub fn gen_type(&self) -> GeneratorType {
        self.drbg.gen_type()
    }

    /// Number of identifiers this generator can still successfully emit.
    pub fn remaining(&self) -> u32 {
        self.drbg.remaining()
    }

    /// Draw the next Contact Identifier. Fails once the generator's
    /// iteration budget ([`GeneratorType::max_iterations`]) is spent, or if
    /// the underlying DRBG fails — in which case the generator is
    /// permanently invalidated.
    pub fn iterate(&mut self) -> Result<ContactIdentifier, CxError> {
        let mut bytes: [u8; 16] = match self.drbg.generate(16) {
            Ok(b) => b.try_into().expect("drbg returned 16 bytes"),
            Err(err) => {
                self.drbg.invalidate();
                return Err(err.into());
            }
        };
        bytes[6] = (bytes[6] & 0x0F) | 0x40;
        bytes[8] = (bytes[8] & 0x3F) | 0x80;
        Ok(Uuid::from_bytes(bytes))
    }
}

/// Seed length (in bytes) required to instantiate a generator of `gen_type`.
pub fn seed_len(gen_type: GeneratorType) -> usize {
    gen_type.seed_len()
}

/// Maximum number of identifiers a generator of `gen_type` can emit.
pub fn max_iterations(gen_type: GeneratorType) -> u32 {
    gen_type.max_iterations()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_shape_is_forced() {
        let seed = [0x07u8; 24];
        let mut gen = Generator::from_seed(GeneratorType::Aes128Ctr2048, &seed).unwrap();
        for _ in 0..16 {
            let id = gen.iterate().unwrap();
            let bytes = id.as_bytes();
            assert_eq!(bytes[6] & 0xF0, 0x40);
            assert_eq!(bytes[8] & 0xC0, 0x80);
        }
    }

    #[test]
    fn determinism_across_independent_generators() {
        let seed = [0x09u8; 24];
        let mut a = Generator::from_seed(GeneratorType::Aes128Ctr2048, &seed).unwrap();
        let mut b = Generator::from_seed(GeneratorType::Aes128Ctr2048, &seed).unwrap();
        for _ in 0..32 {
            assert_eq!(a.iterate().unwrap(), b.iterate().unwrap());
        }
    }

    #[test]
    fn bounded_at_max_iterations() {
        let seed = [0x01u8; 24];
        let mut gen = Generator::from_seed(GeneratorType::Aes128Ctr2048, &seed).unwrap();
        for _ in 0..GeneratorType::Aes128Ctr2048.max_iterations() {
            gen.iterate().expect("within budget");
        }
        assert!(gen.iterate().is_err());
        assert_eq!(gen.remaining(), 0);
    }

    #[test]
    fn natural_aes128_sequence_matches_first_identifier() {
        let mut seed = [0u8; 24];
        for (i, b) in seed.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut gen = Generator::from_seed(GeneratorType::Aes128Ctr2048, &seed).unwrap();
        let first = gen.iterate().unwrap();
        assert_eq!(
            first.to_string(),
            "aeaa0891-03d8-400c-beb0-046a2dab8522"
        );
    }
}
