//! `SeedReportContent` and `TBSSeedReportContent`.

use der::Sequence;
use spki::AlgorithmIdentifierOwned;

use super::descriptor::SeedDescriptorAsn1;
use super::VERSION_V1;

/// `SeedReportContent ::= SEQUENCE { version              INTEGER,
///                                   seedDescriptors      SEQUENCE OF SeedDescriptor,
///                                   publisherName        UTF8String,
///                                   seedReportChallenge  UTF8String }`
///
/// The version field's DEFAULT (v1) is not elided on encode: this core
/// does not need byte-for-byte interop with a second, independent DER
/// encoder, and always writing the field keeps decode simpler. See
/// `DESIGN.md` for that Open Question's resolution.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct SeedReportContentAsn1 {
    /// Seed report format version. Currently always [`VERSION_V1`].
    pub version: u32,
    /// Non-empty, ordered list of preseed commitments.
    pub seed_descriptors: Vec<SeedDescriptorAsn1>,
    /// Publisher name.
    pub publisher_name: String,
    /// Challenge bound into this report.
    pub seed_report_challenge: String,
}

impl SeedReportContentAsn1 {
    /// Build content for version 1 from its descriptors, publisher, and
    /// challenge.
    pub fn new(
        seed_descriptors: Vec<SeedDescriptorAsn1>,
        publisher_name: String,
        seed_report_challenge: String,
    ) -> Self {
        Self {
            version: VERSION_V1,
            seed_descriptors,
            publisher_name,
            seed_report_challenge,
        }
    }
}

/// `TBSSeedReportContent ::= SEQUENCE { content            SeedReportContent,
///                                      signatureAlgorithm AlgorithmIdentifier }`
///
/// The structure whose canonical DER encoding is the message each
/// descriptor's key actually signs. Binding the algorithm identifier into
/// TBS defends against algorithm substitution: verification reconstructs
/// TBS from the algorithm recorded in the `Signature` under test, so a
/// tampered algorithm field changes TBS and invalidates the signature.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct TbsSeedReportContentAsn1 {
    /// The report content being signed.
    pub content: SeedReportContentAsn1,
    /// The algorithm this TBS is signed (or to be signed) under.
    pub signature_algorithm: AlgorithmIdentifierOwned,
}
