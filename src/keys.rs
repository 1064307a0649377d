//! Key handling shared by the seed pipeline, the ASN.1 model, and the
//! signature engine.
//!
//! A [`SeedDescriptor`](crate::asn1::descriptor::SeedDescriptor)'s key is
//! either a full signing key pair (set at construction time, for signing)
//! or a bare verification key (after decoding a report). [`DescriptorKey`]
//! models that union; verification keys are held by `Arc` so a decoded
//! report's descriptors can cheaply share ownership with callers.
use std::sync::Arc;

use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use spki::SubjectPublicKeyInfoOwned;

use crate::error::CxError;

/// Either a signing key pair or a bare verification key.
#[derive(Clone)]
pub enum DescriptorKey {
    /// A full key pair, usable for both signing and verification.
    Signing(Arc<RsaPrivateKey>),
    /// A verification-only key, as retained by a decoded report.
    Verifying(Arc<RsaPublicKey>),
}

impl DescriptorKey {
    /// Wrap a signing key pair.
    pub fn from_signing(key: RsaPrivateKey) -> Self {
        Self::Signing(Arc::new(key))
    }

    /// Wrap a verification-only key.
    pub fn from_verifying(key: RsaPublicKey) -> Self {
        Self::Verifying(Arc::new(key))
    }

    /// The public verification key, regardless of which variant this is.
    pub fn public_key(&self) -> RsaPublicKey {
        match self {
            Self::Signing(sk) => RsaPublicKey::from(sk.as_ref()),
            Self::Verifying(pk) => pk.as_ref().clone(),
        }
    }

    /// Borrow the signing key pair. Fails if this descriptor only holds a
    /// verification key (the case for every descriptor in a decoded
    /// report).
    pub fn signing_key(&self) -> Result<&RsaPrivateKey, CxError> {
        match self {
            Self::Signing(sk) => Ok(sk),
            Self::Verifying(_) => Err(CxError::InvalidParameter(
                "descriptor holds a verification-only key; cannot sign".into(),
            )),
        }
    }
}

/// DER-encode `key`'s SubjectPublicKeyInfo, the canonical form used both as
/// DRBG personalization and as the wire representation embedded in a
/// `SeedDescriptor`.
pub fn encode_spki_der(key: &RsaPublicKey) -> Result<Vec<u8>, CxError> {
    let doc = key
        .to_public_key_der()
        .map_err(|e| CxError::CryptoFailure(e.to_string()))?;
    Ok(doc.as_bytes().to_vec())
}

/// Parse a SubjectPublicKeyInfo (owned ASN.1 model) back into an RSA
/// verification key, as happens when materializing a decoded descriptor.
pub fn rsa_public_key_from_spki(spki: &SubjectPublicKeyInfoOwned) -> Result<RsaPublicKey, CxError> {
    use der::Encode;
    let der_bytes = spki.to_der()?;
    RsaPublicKey::from_public_key_der(&der_bytes).map_err(|e| CxError::DecodeFailure(e.to_string()))
}

/// Encode an RSA verification key directly into the owned ASN.1
/// SubjectPublicKeyInfo model.
pub fn spki_from_rsa_public_key(key: &RsaPublicKey) -> Result<SubjectPublicKeyInfoOwned, CxError> {
    use der::Decode;
    let der_bytes = encode_spki_der(key)?;
    SubjectPublicKeyInfoOwned::from_der(&der_bytes).map_err(CxError::from)
}
