//! NIST SP 800-90A CTR_DRBG driver and generator-type registry for the CX
//! seed report core.
//!
//! This crate is the deterministic-bit-generation primitive consumed by
//! `cx-core`, kept as a separate path dependency so the pure CTR_DRBG
//! construction can be reasoned about (and tested against NIST known-answer
//! vectors) independently of the ASN.1 model and signature engine built on
//! top of it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block_cipher;
mod ctr_drbg;
mod error;
mod gentype;

pub use ctr_drbg::Drbg;
pub use error::DrbgError;
pub use gentype::GeneratorType;
