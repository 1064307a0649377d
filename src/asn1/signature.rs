//! `Signature ::= SEQUENCE { signatureAlgorithm AlgorithmIdentifier,
//!                            signatureValue     OCTET STRING }`

use der::asn1::OctetString;
use der::Sequence;
use spki::AlgorithmIdentifierOwned;

/// One descriptor's signature: the algorithm it was produced under, and
/// the raw signature bytes.
///
/// The algorithm identifier is duplicated into
/// [`TbsSeedReportContentAsn1`](crate::asn1::content::TbsSeedReportContentAsn1)
/// deliberately — see `DESIGN.md` — so that substituting the algorithm
/// recorded here without re-signing is caught by verification.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct SignatureAsn1 {
    /// Algorithm this signature was produced under.
    pub signature_algorithm: AlgorithmIdentifierOwned,
    /// Raw signature bytes.
    pub signature_value: OctetString,
}
