//! `SeedReport ::= SEQUENCE { content SeedReportContent, signatures SEQUENCE OF Signature }`

use der::pem::PemLabel;
use der::Sequence;

use super::content::SeedReportContentAsn1;
use super::signature::SignatureAsn1;

/// PEM armour label for an encoded seed report.
pub const PEM_LABEL: &str = "CX SEED REPORT";

/// The top-level ASN.1 object: report content plus one signature per
/// descriptor (by construction; a decoded report may carry more
/// signatures than descriptors, which `verify` tolerates by only
/// consulting the first `|descriptors|` of them — see `DESIGN.md`).
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct SeedReportAsn1 {
    /// The signed content.
    pub content: SeedReportContentAsn1,
    /// One signature per descriptor, in descriptor order.
    pub signatures: Vec<SignatureAsn1>,
}

impl PemLabel for SeedReportAsn1 {
    const PEM_LABEL: &'static str = PEM_LABEL;
}
