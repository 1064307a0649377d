//! Typed DER/PEM model of the seed report wire format.
//!
//! ```text
//! Signature              ::= SEQUENCE { signatureAlgorithm AlgorithmIdentifier,
//!                                       signatureValue     OCTET STRING }
//! SeedDescriptor         ::= SEQUENCE { generatorType             INTEGER (uint32),
//!                                       preseedValue              OCTET STRING,
//!                                       preseedVerificationKey    SubjectPublicKeyInfo }
//! SeedReportContent      ::= SEQUENCE { version              INTEGER (uint32, default v1),
//!                                       seedDescriptors      SEQUENCE OF SeedDescriptor,
//!                                       publisherName        UTF8String,
//!                                       seedReportChallenge  UTF8String }
//! TBSSeedReportContent   ::= SEQUENCE { content              SeedReportContent,
//!                                       signatureAlgorithm   AlgorithmIdentifier }
//! SeedReport             ::= SEQUENCE { content              SeedReportContent,
//!                                       signatures           SEQUENCE OF Signature }
//! ```
//!
//! All structures round-trip exactly: `decode(encode(x)) == x`. The `der`
//! crate's `Sequence` derive produces canonical DER on encode; decode
//! accepts exactly that, which is sufficient for this core (it is not a
//! general-purpose BER relaxer).

pub mod content;
pub mod descriptor;
pub mod report;
pub mod signature;

pub use content::{SeedReportContentAsn1, TbsSeedReportContentAsn1};
pub use descriptor::SeedDescriptorAsn1;
pub use report::SeedReportAsn1;
pub use signature::SignatureAsn1;

/// The current (and only) seed report version.
pub const VERSION_V1: u32 = 1;
