//! Signature engine: per-descriptor sign/verify over the canonical DER of
//! `TBSSeedReportContent`.

use der::asn1::ObjectIdentifier;
use der::{Any, Encode, Tag};
use rsa::pkcs1v15::{Signature as RsaSignature, SigningKey, VerifyingKey};
use rsa::RsaPublicKey;
use sha2::Sha256;
use signature::{SignatureEncoding, Signer, Verifier};
use spki::AlgorithmIdentifierOwned;

use crate::asn1::content::{SeedReportContentAsn1, TbsSeedReportContentAsn1};
use crate::asn1::signature::SignatureAsn1;
use crate::error::CxError;
use crate::keys::DescriptorKey;

/// `sha256WithRSAEncryption`, the PKCS#1 OID for RSASSA-PKCS1-v1_5 with
/// SHA-256 — the natural default digest/padding for an RSA signing key per
/// §4.5. PKCS#1 requires this algorithm's parameters field to be present
/// and NULL.
const RSA_SHA256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");

fn rsa_sha256_algorithm_identifier() -> AlgorithmIdentifierOwned {
    let null_params = Any::new(Tag::Null, Vec::new()).expect("NULL encodes to an empty value");
    AlgorithmIdentifierOwned {
        oid: RSA_SHA256_OID,
        parameters: Some(null_params),
    }
}

/// Build the TBS structure that is actually signed: `content` paired with
/// the exact signature algorithm the Signature will record.
fn build_tbs(
    content: &SeedReportContentAsn1,
    algorithm: AlgorithmIdentifierOwned,
) -> TbsSeedReportContentAsn1 {
    TbsSeedReportContentAsn1 {
        content: content.clone(),
        signature_algorithm: algorithm,
    }
}

/// Sign `content` under `key`, producing one [`SignatureAsn1`].
///
/// Fails if `key` does not hold a signing key pair (e.g. because it came
/// from a decoded report, which only retains verification keys).
pub fn sign(content: &SeedReportContentAsn1, key: &DescriptorKey) -> Result<SignatureAsn1, CxError> {
    let signing_key = key.signing_key()?;
    let algorithm = rsa_sha256_algorithm_identifier();
    let tbs = build_tbs(content, algorithm.clone());
    let tbs_der = tbs.to_der()?;

    let signer = SigningKey::<Sha256>::new(signing_key.clone());
    let sig: RsaSignature = signer
        .try_sign(&tbs_der)
        .map_err(|e| CxError::CryptoFailure(e.to_string()))?;

    Ok(SignatureAsn1 {
        signature_algorithm: algorithm,
        signature_value: der::asn1::OctetString::new(sig.to_vec())?,
    })
}

/// Verify `signature` over `content` with `key`.
///
/// Reconstructs TBS using exactly the algorithm identifier recorded in
/// `signature` (binding the two copies together), verifies the signature
/// bytes against that reconstruction, and — when `expected_algorithm` is
/// supplied — additionally requires the recorded algorithm to match it
/// bit-for-bit.
pub fn verify(
    content: &SeedReportContentAsn1,
    signature: &SignatureAsn1,
    key: &RsaPublicKey,
    expected_algorithm: Option<&AlgorithmIdentifierOwned>,
) -> Result<(), CxError> {
    if let Some(expected) = expected_algorithm {
        if expected != &signature.signature_algorithm {
            return Err(CxError::VerifyFailure(
                "signature algorithm does not match expected algorithm".into(),
            ));
        }
    }

    let tbs = build_tbs(content, signature.signature_algorithm.clone());
    let tbs_der = tbs.to_der()?;

    let verifying_key = VerifyingKey::<Sha256>::new(key.clone());
    let sig = RsaSignature::try_from(signature.signature_value.as_bytes())
        .map_err(|e| CxError::DecodeFailure(e.to_string()))?;
    verifying_key
        .verify(&tbs_der, &sig)
        .map_err(|_| CxError::VerifyFailure("signature verification failed".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asn1::descriptor::SeedDescriptorAsn1;
    use crate::keys::spki_from_rsa_public_key;
    use rsa::RsaPrivateKey;

    fn sample_content() -> SeedReportContentAsn1 {
        let key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).unwrap();
        let pubkey = RsaPublicKey::from(&key);
        let descriptor = SeedDescriptorAsn1 {
            generator_type: 1,
            preseed_value: der::asn1::OctetString::new(vec![7u8; 24]).unwrap(),
            preseed_verification_key: spki_from_rsa_public_key(&pubkey).unwrap(),
        };
        SeedReportContentAsn1::new(vec![descriptor], "Publisher".into(), "challenge".into())
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let content = sample_content();
        let signing_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).unwrap();
        let pubkey = RsaPublicKey::from(&signing_key);
        let key = DescriptorKey::from_signing(signing_key);

        let sig = sign(&content, &key).unwrap();
        verify(&content, &sig, &pubkey, None).unwrap();
    }

    #[test]
    fn tampered_algorithm_fails_verification() {
        let content = sample_content();
        let signing_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).unwrap();
        let pubkey = RsaPublicKey::from(&signing_key);
        let key = DescriptorKey::from_signing(signing_key);

        let mut sig = sign(&content, &key).unwrap();
        // Altering the recorded algorithm's parameters changes TBS, so
        // verification must fail even though the signature bytes are
        // untouched.
        sig.signature_algorithm.parameters = None;
        assert!(verify(&content, &sig, &pubkey, None).is_err());
    }

    #[test]
    fn wrong_key_fails_verification() {
        let content = sample_content();
        let signing_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).unwrap();
        let other_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).unwrap();
        let key = DescriptorKey::from_signing(signing_key);

        let sig = sign(&content, &key).unwrap();
        assert!(verify(&content, &sig, &RsaPublicKey::from(&other_key), None).is_err());
    }
}
