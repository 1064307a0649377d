//! Thin AES-128/AES-256 block encryption wrapper used internally by the
//! CTR_DRBG state machine. Not exposed outside the crate: the DRBG is the
//! only consumer, and it only ever needs single-block ECB-mode encryption.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::cipher::generic_array::GenericArray;
use aes::{Aes128, Aes256};

pub(crate) const BLOCK_LEN: usize = 16;

pub(crate) enum Cipher {
    Aes128(Box<Aes128>),
    Aes256(Box<Aes256>),
}

impl Cipher {
    pub(crate) fn new(key: &[u8]) -> Self {
        match key.len() {
            16 => Cipher::Aes128(Box::new(Aes128::new(GenericArray::from_slice(key)))),
            32 => Cipher::Aes256(Box::new(Aes256::new(GenericArray::from_slice(key)))),
            other => panic!("unsupported AES key length {other}"),
        }
    }

    pub(crate) fn encrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        let ga = GenericArray::from_mut_slice(block);
        match self {
            Cipher::Aes128(c) => c.encrypt_block(ga),
            Cipher::Aes256(c) => c.encrypt_block(ga),
        }
    }
}

// `aes`'s cipher structs hold only the expanded round-key schedule and
// expose no zeroizing constructor; the secret this crate actually protects
// is the CTR_DRBG's running Key/V state, which is zeroized explicitly by
// its own `Zeroizing` fields in `ctr_drbg.rs`.
