//! Cryptographic core of a Contact Identifier (CX) scheme: a bounded,
//! deterministic RFC 4122 v4 UUID generator driven by a seeded CTR_DRBG,
//! plus the signed seed report format publishers use to commit to a
//! generator's seed without revealing it.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod asn1;
pub mod error;
pub mod generator;
pub mod keys;
pub mod report;
pub mod seed;
pub mod sign;

pub use cx_drbg::{Drbg, GeneratorType};

pub use error::CxError;
pub use generator::{max_iterations, seed_len, ContactIdentifier, Generator};
pub use keys::DescriptorKey;
pub use report::{sign_asn1, sign_der, sign_pem, verify_asn1, verify_der, verify_pem, SeedDescriptor, SeedReport};
pub use seed::{preseed_key, preseed_value, seedcalc, DEFAULT_RSA_BITS};

/// Library version, as declared in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
