//! Seed derivation pipeline: `preseed_value`, `preseed_key`, and `seedcalc`.
//!
//! `seedcalc` is the contract auditors rely on: given a published preseed
//! and the publisher's verification key, it reproduces the exact seed that
//! drove the publisher's Contact Identifier generator, with no further
//! secret material involved.

use cx_drbg::{Drbg, GeneratorType};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::CxError;
use crate::keys::encode_spki_der;

/// Default RSA key size used by [`preseed_key`]. Any asymmetric signature
/// key provider is acceptable to the core; this is only the reference
/// construction's convenience default.
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Generate a fresh preseed: instantiate a one-shot DRBG from system
/// randomness and draw exactly `seed_len(type)` bytes.
pub fn preseed_value(gen_type: GeneratorType) -> Result<Vec<u8>, CxError> {
    let mut drbg = Drbg::instantiate_fresh(gen_type)?;
    let bytes = drbg.generate(gen_type.seed_len())?;
    drbg.uninstantiate();
    Ok(bytes)
}

/// Convenience default asymmetric key pair for a publisher: RSA-2048.
/// Callers are free to supply their own key pair instead; this exists so a
/// publisher need not pull in key-generation policy of their own.
pub fn preseed_key() -> Result<RsaPrivateKey, CxError> {
    RsaPrivateKey::new(&mut rand::rngs::OsRng, DEFAULT_RSA_BITS).map_err(CxError::from)
}

/// Deterministically recompute the seed a publisher's generator was
/// instantiated with, from a published preseed and the publisher's
/// verification key.
///
/// `seedcalc` instantiates a CTR_DRBG of `gen_type` treating `preseed` as
/// `entropy || nonce`, with the DER-encoded SubjectPublicKeyInfo of
/// `verification_key` as personalization string, then draws exactly
/// `seed_len(gen_type)` bytes. Identical inputs always yield identical
/// output.
pub fn seedcalc(
    gen_type: GeneratorType,
    preseed: &[u8],
    verification_key: &RsaPublicKey,
) -> Result<Vec<u8>, CxError> {
    if preseed.len() != gen_type.seed_len() {
        return Err(CxError::InvalidParameter(format!(
            "preseed length {} does not match generator type seed length {}",
            preseed.len(),
            gen_type.seed_len()
        )));
    }
    let personalization = encode_spki_der(verification_key)?;

    let mut drbg = Drbg::instantiate(gen_type, preseed, Some(&personalization))?;
    let seed = drbg.generate(gen_type.seed_len())?;
    drbg.uninstantiate();
    Ok(seed)
}
