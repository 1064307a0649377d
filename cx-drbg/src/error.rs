//! Error taxonomy for the CTR_DRBG driver.

use thiserror::Error;

/// Failure modes of the DRBG driver and generator type registry.
///
/// Every variant carries an optional diagnostic string; nothing here
/// propagates the state of a half-completed operation, per the "binary
/// ok/not-ok signal plus optional message" policy of the core's error
/// handling design.
#[derive(Debug, Error)]
pub enum DrbgError {
    /// Unknown generator type, or an entropy/nonce/input length that does
    /// not match the type's fixed parameters.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The generate-call cap has been reached; the instance is permanently
    /// invalid from this point on.
    #[error("drbg generate budget exhausted")]
    Exhausted,

    /// The underlying block-cipher primitive reported failure. The caller
    /// must treat the DRBG instance as permanently invalidated.
    #[error("drbg cipher failure: {0}")]
    CryptoFailure(String),
}

impl DrbgError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidParameter(detail.into())
    }
}
