//! `SeedDescriptor ::= SEQUENCE { generatorType          INTEGER (uint32),
//!                                 preseedValue           OCTET STRING,
//!                                 preseedVerificationKey SubjectPublicKeyInfo }`

use der::asn1::OctetString;
use der::Sequence;
use spki::SubjectPublicKeyInfoOwned;

/// One published preseed commitment: its generator type, the preseed
/// bytes themselves, and the verification key it is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct SeedDescriptorAsn1 {
    /// Wire tag of the [`cx_drbg::GeneratorType`] this preseed was drawn
    /// for.
    pub generator_type: u32,
    /// The preseed bytes. Length must equal `generator_type`'s seed
    /// length; enforced by callers constructing or decoding a descriptor,
    /// not by the ASN.1 layer itself.
    pub preseed_value: OctetString,
    /// The publisher's verification key, embedded as
    /// SubjectPublicKeyInfo.
    pub preseed_verification_key: SubjectPublicKeyInfoOwned,
}
