//! UBL 2.1 invoice parsing for the Croatian CIUS profile.
//!
//! Parsing happens in two steps: the raw bytes become a namespace-aware,
//! read-only [`Document`] tree, and the extractor walks that tree with
//! [`Locator`] paths to fill an [`InvoiceRecord`](crate::core::InvoiceRecord).
//!
//! # Example
//!
//! ```no_run
//! use eracun::ubl;
//!
//! let xml = std::fs::read("racun.xml").unwrap();
//! let record = ubl::parse_invoice(&xml).unwrap();
//! println!("{} owes {}", record.customer.name, record.totals.payable);
//! ```

mod attachment;
mod document;
mod download;
mod extract;
mod locator;

pub use attachment::{PDF_MAGIC, decoded_size, find_pdf_attachment};
pub use document::{Document, Node};
pub use download::{RecoveredPdf, encode_xml_payload, recover_pdf, sanitize_filename};
pub use extract::{extract_invoice, parse_invoice};
pub use locator::{Locator, LocatorError, Lookup};

/// Namespace URIs used by Croatian UBL invoices.
pub mod ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const EXT: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonExtensionComponents-2";
    pub const HREXTAC: &str = "urn:mfin.gov.hr:schema:xsd:HRExtensionAggregateComponents-1";
}

/// Prefixes understood in locator expressions.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("ubl", ns::INVOICE),
    ("cbc", ns::CBC),
    ("cac", ns::CAC),
    ("ext", ns::EXT),
    ("hrextac", ns::HREXTAC),
];

pub(crate) fn namespace_for_prefix(prefix: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}
