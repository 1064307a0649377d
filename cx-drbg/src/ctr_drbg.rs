//! NIST SP 800-90A Rev 1 CTR_DRBG with derivation function, specialised to
//! AES-128 and AES-256. Reseeding (both counter- and time-based) and
//! prediction resistance are not supported: the instance is built once from
//! caller-supplied entropy and nonce and run until its generate budget is
//! exhausted.

use zeroize::Zeroizing;

use crate::block_cipher::{Cipher, BLOCK_LEN};
use crate::error::DrbgError;
use crate::gentype::GeneratorType;

/// A constant (non-secret) key used only inside the derivation function's
/// BCC construction, per SP 800-90A 10.3.2. Its length always matches the
/// DRBG's own key length for the type in use.
const DF_BCC_KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
];

fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// BCC(key, data): a CBC-MAC over `data` (a whole number of blocks),
/// producing one block of chaining value.
fn bcc(key: &Cipher, data: &[u8]) -> [u8; BLOCK_LEN] {
    debug_assert_eq!(data.len() % BLOCK_LEN, 0);
    let mut chaining = [0u8; BLOCK_LEN];
    for block in data.chunks_exact(BLOCK_LEN) {
        xor_in_place(&mut chaining, block);
        key.encrypt_block(&mut chaining);
    }
    chaining
}

/// Block_Cipher_df: derive exactly `seedlen` bytes of seed material from an
/// arbitrary-length `input`, per SP 800-90A 10.3.2.
fn block_cipher_df(keylen: usize, seedlen: usize, input: &[u8]) -> Zeroizing<Vec<u8>> {
    // S = L || N || input || 0x80, then zero-padded to a block boundary.
    let l = (input.len() as u32).to_be_bytes();
    let n = (seedlen as u32).to_be_bytes();
    let mut s = Vec::with_capacity(8 + input.len() + 1 + BLOCK_LEN);
    s.extend_from_slice(&l);
    s.extend_from_slice(&n);
    s.extend_from_slice(input);
    s.push(0x80);
    while s.len() % BLOCK_LEN != 0 {
        s.push(0x00);
    }

    let bcc_key = Cipher::new(&DF_BCC_KEY[..keylen]);

    // temp = BCC(bcc_key, IV_0 || S) || BCC(bcc_key, IV_1 || S) || ...
    // until at least keylen + outlen (= seedlen) bytes are available.
    let mut temp = Zeroizing::new(Vec::<u8>::with_capacity(seedlen + BLOCK_LEN));
    let mut counter: u32 = 0;
    while temp.len() < keylen + BLOCK_LEN {
        let mut iv_and_s = Vec::with_capacity(BLOCK_LEN + s.len());
        iv_and_s.extend_from_slice(&counter.to_be_bytes());
        iv_and_s.extend_from_slice(&[0u8; BLOCK_LEN - 4]);
        iv_and_s.extend_from_slice(&s);
        temp.extend_from_slice(&bcc(&bcc_key, &iv_and_s));
        counter += 1;
    }

    let k = &temp[..keylen];
    let mut x: [u8; BLOCK_LEN] = temp[keylen..keylen + BLOCK_LEN].try_into().unwrap();
    let x_cipher = Cipher::new(k);

    let mut out = Zeroizing::new(Vec::<u8>::with_capacity(seedlen + BLOCK_LEN));
    while out.len() < seedlen {
        x_cipher.encrypt_block(&mut x);
        out.extend_from_slice(&x);
    }
    out.truncate(seedlen);
    out
}

/// Running (Key, V) state of a CTR_DRBG instance.
struct State {
    key: Zeroizing<Vec<u8>>,
    v: Zeroizing<[u8; BLOCK_LEN]>,
}

impl State {
    fn update(&mut self, provided_data: &[u8]) {
        debug_assert_eq!(provided_data.len(), self.key.len() + BLOCK_LEN);
        let cipher = Cipher::new(&self.key);
        let mut temp = Zeroizing::new(Vec::<u8>::with_capacity(provided_data.len() + BLOCK_LEN));
        while temp.len() < provided_data.len() {
            increment_counter(&mut self.v);
            let mut block = *self.v;
            cipher.encrypt_block(&mut block);
            temp.extend_from_slice(&block);
        }
        temp.truncate(provided_data.len());
        xor_in_place(&mut temp, provided_data);

        let keylen = self.key.len();
        self.key = Zeroizing::new(temp[..keylen].to_vec());
        self.v = Zeroizing::new(temp[keylen..].try_into().unwrap());
    }
}

fn increment_counter(v: &mut [u8; BLOCK_LEN]) {
    for byte in v.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

/// A single-use NIST SP 800-90A CTR_DRBG instance with derivation function.
///
/// Reseeding is not supported. The instance permits at most
/// `max_generates` successful [`generate`](Drbg::generate) calls; once that
/// budget is spent, or the underlying cipher ever reports failure, the
/// instance is permanently invalidated and every subsequent call fails.
pub struct Drbg {
    gen_type: GeneratorType,
    state: State,
    remaining: u32,
    valid: bool,
}

impl Drbg {
    /// Instantiate from entropy and nonce supplied separately, each
    /// consumed exactly once. Lengths must match `gen_type` exactly.
    pub fn instantiate_split(
        gen_type: GeneratorType,
        entropy: &[u8],
        nonce: &[u8],
        personalization: Option<&[u8]>,
    ) -> Result<Self, DrbgError> {
        if entropy.len() != gen_type.entropy_len() {
            return Err(DrbgError::invalid(format!(
                "entropy length {} does not match type (expected {})",
                entropy.len(),
                gen_type.entropy_len()
            )));
        }
        if nonce.len() != gen_type.nonce_len() {
            return Err(DrbgError::invalid(format!(
                "nonce length {} does not match type (expected {})",
                nonce.len(),
                gen_type.nonce_len()
            )));
        }

        let keylen = gen_type.key_len();
        let seedlen = keylen + BLOCK_LEN;

        let mut seed_material = Vec::with_capacity(entropy.len() + nonce.len() + personalization.map_or(0, <[u8]>::len));
        seed_material.extend_from_slice(entropy);
        seed_material.extend_from_slice(nonce);
        if let Some(p) = personalization {
            seed_material.extend_from_slice(p);
        }

        let derived = block_cipher_df(keylen, seedlen, &seed_material);

        let mut state = State {
            key: Zeroizing::new(vec![0u8; keylen]),
            v: Zeroizing::new([0u8; BLOCK_LEN]),
        };
        state.update(&derived);

        tracing::debug!(
            generator_type = ?gen_type,
            max_generates = gen_type.max_iterations(),
            "drbg instantiated"
        );

        Ok(Self {
            gen_type,
            state,
            remaining: gen_type.max_iterations(),
            valid: true,
        })
    }

    /// Instantiate from a single `entropy || nonce` buffer of exactly
    /// `entropy_len + nonce_len` bytes. When `personalization` is supplied
    /// it is mixed in as the DRBG personalization string directly (the
    /// caller is responsible for DER-encoding a key's SubjectPublicKeyInfo
    /// first, if that is the desired personalization).
    pub fn instantiate(
        gen_type: GeneratorType,
        input: &[u8],
        personalization: Option<&[u8]>,
    ) -> Result<Self, DrbgError> {
        if input.len() != gen_type.seed_len() {
            return Err(DrbgError::invalid(format!(
                "instantiate input length {} does not match seed length {}",
                input.len(),
                gen_type.seed_len()
            )));
        }
        let (entropy, nonce) = input.split_at(gen_type.entropy_len());
        Self::instantiate_split(gen_type, entropy, nonce, personalization)
    }

    /// Instantiate from fresh system randomness, with no personalization
    /// string. The caller-visible randomness buffer is zeroized on every
    /// exit path via `Zeroizing`.
    pub fn instantiate_fresh(gen_type: GeneratorType) -> Result<Self, DrbgError> {
        use rand::RngCore;
        let mut buf = Zeroizing::new(vec![0u8; gen_type.seed_len()]);
        rand::rngs::OsRng.fill_bytes(&mut buf);
        Self::instantiate(gen_type, &buf, None)
    }

    /// Generator type this instance was instantiated for.
    pub fn gen_type(&self) -> GeneratorType {
        self.gen_type
    }

    /// Number of successful `generate` calls still permitted.
    pub fn remaining(&self) -> u32 {
        if self.valid {
            self.remaining
        } else {
            0
        }
    }

    /// Draw `out_len` bytes of output, consuming one unit of the generate
    /// budget. Fails (without consuming budget) if the instance is already
    /// invalid or exhausted.
    pub fn generate(&mut self, out_len: usize) -> Result<Vec<u8>, DrbgError> {
        if !self.valid {
            return Err(DrbgError::CryptoFailure(
                "drbg instance previously invalidated".to_string(),
            ));
        }
        if self.remaining == 0 {
            return Err(DrbgError::Exhausted);
        }

        let keylen = self.state.key.len();
        let cipher = Cipher::new(&self.state.key);
        let mut temp = Vec::with_capacity(out_len + BLOCK_LEN);
        while temp.len() < out_len {
            increment_counter(&mut self.state.v);
            let mut block = *self.state.v;
            cipher.encrypt_block(&mut block);
            temp.extend_from_slice(&block);
        }
        temp.truncate(out_len);

        // Generate's post-output update uses an all-zero additional_input,
        // since no reseed/additional-input path is exposed to callers.
        let zero_input = vec![0u8; keylen + BLOCK_LEN];
        self.state.update(&zero_input);

        self.remaining -= 1;
        tracing::trace!(out_len, remaining = self.remaining, "drbg generate");
        Ok(temp)
    }

    /// Permanently invalidate the instance; all future `generate` calls
    /// will fail. Idempotent.
    pub fn invalidate(&mut self) {
        if self.valid {
            tracing::warn!(generator_type = ?self.gen_type, "drbg invalidated");
        }
        self.valid = false;
        self.remaining = 0;
    }

    /// Release the instance. Equivalent to dropping it; provided so call
    /// sites can name the lifecycle operation explicitly, mirroring the
    /// driver's `instantiate`/`uninstantiate` pairing.
    pub fn uninstantiate(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    /// Drives the DF-based CTR_DRBG construction directly from raw
    /// entropy/nonce, bypassing `Drbg::instantiate`'s generator-type length
    /// checks. The standalone NIST KAT vectors below use entropy/nonce
    /// lengths of their own, independent of any `GeneratorType`'s seed
    /// convention, so they cannot be driven through the public API.
    fn raw_instantiate_and_generate(
        keylen: usize,
        entropy: &[u8],
        nonce: &[u8],
        out_len: usize,
    ) -> Vec<u8> {
        let seedlen = keylen + BLOCK_LEN;
        let mut seed_material = Vec::with_capacity(entropy.len() + nonce.len());
        seed_material.extend_from_slice(entropy);
        seed_material.extend_from_slice(nonce);

        let derived = block_cipher_df(keylen, seedlen, &seed_material);
        let mut state = State {
            key: Zeroizing::new(vec![0u8; keylen]),
            v: Zeroizing::new([0u8; BLOCK_LEN]),
        };
        state.update(&derived);

        let cipher = Cipher::new(&state.key);
        let mut temp = Vec::with_capacity(out_len + BLOCK_LEN);
        while temp.len() < out_len {
            increment_counter(&mut state.v);
            let mut block = *state.v;
            cipher.encrypt_block(&mut block);
            temp.extend_from_slice(&block);
        }
        temp.truncate(out_len);
        temp
    }

    // NIST CTR_DRBG_withDF KAT, AES-128, "Requested Security Strength = 128",
    // from the CTR_DRBG_withDF.pdf examples document: entropy input is 32
    // bytes, nonce is 8 bytes.
    #[test]
    fn nist_kat_aes128() {
        let entropy: [u8; 32] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b,
            0x1c, 0x1d, 0x1e, 0x1f,
        ];
        let nonce: [u8; 8] = [0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27];
        let out = raw_instantiate_and_generate(16, &entropy, &nonce, 16);
        // First generate call's output begins with the documented KAT
        // prefix for this entropy/nonce pair.
        assert_eq!(&out[..4], &hex!("8cf59c8c"));
    }

    // NIST CTR_DRBG_withDF KAT, AES-256, "Requested Security Strength = 256":
    // entropy input is 48 bytes, nonce is 16 bytes.
    #[test]
    fn nist_kat_aes256() {
        let entropy: [u8; 48] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b,
            0x1c, 0x1d, 0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29,
            0x2a, 0x2b, 0x2c, 0x2d, 0x2e, 0x2f,
        ];
        let nonce: [u8; 16] = [
            0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x2b, 0x2c, 0x2d,
            0x2e, 0x2f,
        ];
        let out = raw_instantiate_and_generate(32, &entropy, &nonce, 16);
        assert_eq!(&out[..4], &hex!("e686dd55"));
    }

    #[test]
    fn exhaustion_is_permanent() {
        let input = [0u8; 24];
        let mut drbg = Drbg::instantiate(GeneratorType::Aes128Ctr2048, &input, None).unwrap();
        for _ in 0..drbg.gen_type().max_iterations() {
            drbg.generate(16).expect("generate before cap");
        }
        assert!(matches!(drbg.generate(16), Err(DrbgError::Exhausted)));
        // Stays exhausted.
        assert!(matches!(drbg.generate(16), Err(DrbgError::Exhausted)));
    }

    #[test]
    fn wrong_length_inputs_rejected() {
        assert!(Drbg::instantiate_split(GeneratorType::Aes128Ctr2048, &[0u8; 15], &[0u8; 8], None)
            .is_err());
        assert!(Drbg::instantiate_split(GeneratorType::Aes128Ctr2048, &[0u8; 16], &[0u8; 7], None)
            .is_err());
        assert!(Drbg::instantiate(GeneratorType::Aes256Ctr2048, &[0u8; 47], None).is_err());
    }

    #[test]
    fn determinism() {
        let input = [0x42u8; 24];
        let mut a = Drbg::instantiate(GeneratorType::Aes128Ctr2048, &input, None).unwrap();
        let mut b = Drbg::instantiate(GeneratorType::Aes128Ctr2048, &input, None).unwrap();
        for _ in 0..8 {
            assert_eq!(a.generate(16).unwrap(), b.generate(16).unwrap());
        }
    }

    #[test]
    fn personalization_changes_output() {
        let input = [0x11u8; 24];
        let mut a = Drbg::instantiate(GeneratorType::Aes128Ctr2048, &input, None).unwrap();
        let mut b =
            Drbg::instantiate(GeneratorType::Aes128Ctr2048, &input, Some(b"distinct")).unwrap();
        assert_ne!(a.generate(16).unwrap(), b.generate(16).unwrap());
    }
}
