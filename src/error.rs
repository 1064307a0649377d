//! Error taxonomy for the CX seed report core.
//!
//! Every fallible operation returns `Result<T, CxError>`. Variants mirror
//! the error kinds enumerated by the core's error handling design: an
//! operation either fails cleanly (no partial state is left behind,
//! ownership of the caller's inputs is unchanged) or it does not return at
//! all. Nothing here is retried internally.

use thiserror::Error;

/// The CX core's single error surface.
#[derive(Debug, Error)]
pub enum CxError {
    /// Unknown generator type, wrong preseed/entropy/nonce length, or an
    /// empty required string (publisher name, challenge).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A generator or DRBG has emitted its maximum number of outputs.
    #[error("generator exhausted")]
    Exhausted,

    /// The underlying signing, verifying, key-generation, or DRBG
    /// primitive reported failure.
    #[error("crypto failure: {0}")]
    CryptoFailure(String),

    /// DER/PEM was not well-formed, a required field was absent, or an
    /// embedded SubjectPublicKeyInfo could not be parsed.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// A per-descriptor signature failed to verify, the signature count
    /// did not cover every descriptor, or a pinned algorithm identifier
    /// did not match the one recorded in the report.
    #[error("verification failure: {0}")]
    VerifyFailure(String),

    /// Allocation or similar resource failure.
    #[error("resource failure")]
    ResourceFailure,
}

impl From<cx_drbg::DrbgError> for CxError {
    fn from(err: cx_drbg::DrbgError) -> Self {
        match err {
            cx_drbg::DrbgError::InvalidParameter(detail) => CxError::InvalidParameter(detail),
            cx_drbg::DrbgError::Exhausted => CxError::Exhausted,
            cx_drbg::DrbgError::CryptoFailure(detail) => CxError::CryptoFailure(detail),
        }
    }
}

impl From<der::Error> for CxError {
    fn from(err: der::Error) -> Self {
        CxError::DecodeFailure(err.to_string())
    }
}

impl From<rsa::Error> for CxError {
    fn from(err: rsa::Error) -> Self {
        CxError::CryptoFailure(err.to_string())
    }
}

impl From<spki::Error> for CxError {
    fn from(err: spki::Error) -> Self {
        CxError::DecodeFailure(err.to_string())
    }
}

impl From<signature::Error> for CxError {
    fn from(err: signature::Error) -> Self {
        CxError::VerifyFailure(err.to_string())
    }
}
