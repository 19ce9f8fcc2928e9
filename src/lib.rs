//! # eracun
//!
//! Reads Croatian e-invoices (UBL 2.1 with the HR CIUS extension) into a
//! flat, display-ready record and turns the payable amount into an encrypted
//! HUB3 payment barcode URL.
//!
//! Extracted values stay strings, exactly as they appear in the document.
//! Amounts become [`rust_decimal::Decimal`] only where arithmetic happens
//! (payable checks, derived totals) and integer cents at the barcode boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "ubl")] {
//! use eracun::ubl::parse_invoice;
//!
//! let xml = br#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
//!     xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2"
//!     xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2">
//!   <cbc:ID>1-P1-1</cbc:ID>
//!   <cac:PaymentMeans><cbc:PaymentID>HR01 123-456</cbc:PaymentID></cac:PaymentMeans>
//!   <cac:LegalMonetaryTotal><cbc:PayableAmount currencyID="EUR">150.00</cbc:PayableAmount></cac:LegalMonetaryTotal>
//! </Invoice>"#;
//!
//! let record = parse_invoice(xml).unwrap();
//! assert_eq!(record.invoice_id, "1-P1-1");
//! assert_eq!(record.payment.model, "HR01");
//! assert_eq!(record.payment.reference, "123-456");
//! assert_eq!(eracun::amount_to_cents(&record.totals.payable), "15000");
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | (always) | Record types, normalizers, upload admission, errors |
//! | `ubl` (default) | XML parsing, field extraction, PDF attachment, download round-trip |
//! | `hub3` | HUB3 payload, AES-256-CBC encryption, renderer config, upload pipeline |
//! | `all` | Everything |

pub mod core;

#[cfg(feature = "ubl")]
pub mod ubl;

#[cfg(feature = "hub3")]
pub mod hub3;

// Re-export core types at crate root for convenience
pub use crate::core::*;
