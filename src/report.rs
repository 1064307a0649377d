//! Report façade: high-level sign/verify in DER, PEM, and in-memory forms,
//! plus the in-memory `SeedReport`/`SeedDescriptor` representation and its
//! state machine (populated → signed → mutated-back-to-unsigned; decoded →
//! verified).

use der::asn1::OctetString;
use der::pem::{LineEnding, PemLabel};
use der::{Decode, DecodePem, Encode, EncodePem};

use cx_drbg::GeneratorType;

use crate::asn1::content::SeedReportContentAsn1;
use crate::asn1::descriptor::SeedDescriptorAsn1;
use crate::asn1::report::SeedReportAsn1;
use crate::asn1::signature::SignatureAsn1;
use crate::error::CxError;
use crate::keys::{rsa_public_key_from_spki, spki_from_rsa_public_key, DescriptorKey};
use crate::sign;

/// One preseed commitment plus the key that signs it (at construction
/// time) or verifies it (after decoding a report).
#[derive(Clone)]
pub struct SeedDescriptor {
    /// The generator type this preseed was drawn for.
    pub generator_type: GeneratorType,
    /// Preseed bytes. Length must equal `generator_type.seed_len()`.
    pub preseed: Vec<u8>,
    /// Signing or verification key.
    pub key: DescriptorKey,
}

impl SeedDescriptor {
    /// Build a descriptor, rejecting a preseed whose length does not match
    /// `generator_type`.
    pub fn new(
        generator_type: GeneratorType,
        preseed: Vec<u8>,
        key: DescriptorKey,
    ) -> Result<Self, CxError> {
        if preseed.len() != generator_type.seed_len() {
            return Err(CxError::InvalidParameter(format!(
                "preseed length {} does not match generator type seed length {}",
                preseed.len(),
                generator_type.seed_len()
            )));
        }
        Ok(Self {
            generator_type,
            preseed,
            key,
        })
    }

    fn to_asn1(&self) -> Result<SeedDescriptorAsn1, CxError> {
        Ok(SeedDescriptorAsn1 {
            generator_type: self.generator_type.wire_tag(),
            preseed_value: OctetString::new(self.preseed.clone())?,
            preseed_verification_key: spki_from_rsa_public_key(&self.key.public_key())?,
        })
    }

    fn from_asn1(descriptor: &SeedDescriptorAsn1) -> Result<Self, CxError> {
        let generator_type = GeneratorType::from_wire_tag(descriptor.generator_type)?;
        let key = rsa_public_key_from_spki(&descriptor.preseed_verification_key)?;
        Self::new(
            generator_type,
            descriptor.preseed_value.as_bytes().to_vec(),
            DescriptorKey::from_verifying(key),
        )
    }
}

/// An in-memory seed report.
///
/// `publisher_name`, `seed_report_challenge`, and `descriptors` may be
/// freely mutated; [`sign`](SeedReport::sign) discards any prior signature
/// set and produces a fresh, self-consistent one, and
/// [`add_descriptor`](SeedReport::add_descriptor) invalidates a report's
/// existing signatures (mutating the other two fields directly leaves a
/// stale signature set in place until the next `sign` or `verify` call
/// notices the mismatch).
pub struct SeedReport {
    /// Publisher name.
    pub publisher_name: String,
    /// Challenge bound into this report.
    pub seed_report_challenge: String,
    /// Ordered, non-empty-once-signed list of preseed descriptors.
    pub descriptors: Vec<SeedDescriptor>,
    signatures: Vec<SignatureAsn1>,
}

impl SeedReport {
    /// Start an empty, unsigned report.
    pub fn new(publisher_name: impl Into<String>, seed_report_challenge: impl Into<String>) -> Self {
        Self {
            publisher_name: publisher_name.into(),
            seed_report_challenge: seed_report_challenge.into(),
            descriptors: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Append a descriptor, invalidating any existing signature set.
    pub fn add_descriptor(&mut self, descriptor: SeedDescriptor) {
        self.descriptors.push(descriptor);
        self.signatures.clear();
    }

    /// Whether this report currently carries a signature for every
    /// descriptor. Does not itself verify those signatures.
    pub fn is_signed(&self) -> bool {
        !self.descriptors.is_empty() && self.signatures.len() >= self.descriptors.len()
    }

    fn content(&self) -> Result<SeedReportContentAsn1, CxError> {
        let seed_descriptors = self
            .descriptors
            .iter()
            .map(SeedDescriptor::to_asn1)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SeedReportContentAsn1::new(
            seed_descriptors,
            self.publisher_name.clone(),
            self.seed_report_challenge.clone(),
        ))
    }

    /// Discard any pre-existing signatures, sign each descriptor in order
    /// with its own key, then immediately re-verify the result. The whole
    /// operation fails (leaving the report unsigned) if any step fails.
    pub fn sign(&mut self) -> Result<(), CxError> {
        if self.descriptors.is_empty() {
            return Err(CxError::InvalidParameter(
                "cannot sign a report with no descriptors".into(),
            ));
        }
        self.signatures.clear();
        let content = self.content()?;

        let mut signatures = Vec::with_capacity(self.descriptors.len());
        for descriptor in &self.descriptors {
            signatures.push(sign::sign(&content, &descriptor.key)?);
        }
        for (descriptor, signature) in self.descriptors.iter().zip(&signatures) {
            sign::verify(&content, signature, &descriptor.key.public_key(), None)?;
        }

        tracing::debug!(descriptors = signatures.len(), "report signed");
        self.signatures = signatures;
        Ok(())
    }

    /// Verify every descriptor's signature.
    ///
    /// Requires at least one descriptor and at least as many recorded
    /// signatures as descriptors; only the first `|descriptors|` signatures
    /// are consulted, so trailing extras are tolerated (see `DESIGN.md`).
    pub fn verify(&self) -> Result<(), CxError> {
        if self.descriptors.is_empty() {
            return Err(CxError::InvalidParameter(
                "cannot verify a report with no descriptors".into(),
            ));
        }
        if self.signatures.len() < self.descriptors.len() {
            return Err(CxError::VerifyFailure(format!(
                "{} signature(s) do not cover {} descriptor(s)",
                self.signatures.len(),
                self.descriptors.len()
            )));
        }
        let content = self.content()?;
        for (descriptor, signature) in self.descriptors.iter().zip(&self.signatures) {
            sign::verify(&content, signature, &descriptor.key.public_key(), None)?;
        }
        tracing::debug!(descriptors = self.descriptors.len(), "report verified");
        Ok(())
    }

    fn to_asn1(&self) -> Result<SeedReportAsn1, CxError> {
        Ok(SeedReportAsn1 {
            content: self.content()?,
            signatures: self.signatures.clone(),
        })
    }

    fn from_asn1(asn1: &SeedReportAsn1) -> Result<Self, CxError> {
        let descriptors = asn1
            .content
            .seed_descriptors
            .iter()
            .map(SeedDescriptor::from_asn1)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            publisher_name: asn1.content.publisher_name.clone(),
            seed_report_challenge: asn1.content.seed_report_challenge.clone(),
            descriptors,
            signatures: asn1.signatures.clone(),
        })
    }
}

/// Sign `report` in place and return its ASN.1 form. The caller retains
/// ownership of `report`.
pub fn sign_asn1(report: &mut SeedReport) -> Result<SeedReportAsn1, CxError> {
    report.sign()?;
    report.to_asn1()
}

/// Sign `report` and return its canonical DER encoding.
pub fn sign_der(report: &mut SeedReport) -> Result<Vec<u8>, CxError> {
    let asn1 = sign_asn1(report)?;
    asn1.to_der().map_err(CxError::from)
}

/// Sign `report` and return its PEM encoding (label `CX SEED REPORT`).
pub fn sign_pem(report: &mut SeedReport) -> Result<String, CxError> {
    let asn1 = sign_asn1(report)?;
    asn1.to_pem(LineEnding::LF)
        .map_err(|e| CxError::CryptoFailure(e.to_string()))
}

/// Verify an already-decoded ASN.1 report and, on success, materialize an
/// in-memory [`SeedReport`] with deep-copied preseeds and retained
/// verification keys.
pub fn verify_asn1(asn1: &SeedReportAsn1) -> Result<SeedReport, CxError> {
    let report = SeedReport::from_asn1(asn1)?;
    report.verify()?;
    Ok(report)
}

/// Decode a canonical DER-encoded report and verify it.
pub fn verify_der(bytes: &[u8]) -> Result<SeedReport, CxError> {
    let asn1 = SeedReportAsn1::from_der(bytes)?;
    verify_asn1(&asn1)
}

/// Decode a PEM-encoded report (label `CX SEED REPORT`) and verify it.
pub fn verify_pem(pem: &str) -> Result<SeedReport, CxError> {
    let asn1 = SeedReportAsn1::from_pem(pem).map_err(|e| CxError::DecodeFailure(e.to_string()))?;
    verify_asn1(&asn1)
}
