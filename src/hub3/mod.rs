//! HUB3 payment barcodes.
//!
//! Croatian banking apps scan a HUB3 2D barcode to prefill a payment order.
//! An external renderer draws the barcode from an encrypted JSON payload
//! passed in its `data` query parameter. This module builds that payload
//! from an [`InvoiceRecord`], encrypts it, and assembles the renderer URL.
//!
//! ```no_run
//! use eracun::hub3::{Hub3Config, process_upload};
//!
//! let config = Hub3Config::from_env()?;
//! let xml = std::fs::read("racun.xml").unwrap();
//! let upload = process_upload(&xml, "racun.xml", None, &config)?;
//! if let Some(url) = upload.barcode_url {
//!     println!("<img src=\"{url}\">");
//! }
//! # Ok::<(), eracun::EracunError>(())
//! ```

mod cipher;
mod config;
mod payload;

pub use cipher::{EncryptionKey, IV_LEN, KEY_LEN, decrypt_payload, encrypt_bytes, encrypt_payload};
pub use config::{DEFAULT_RENDERER_URL, Hub3Config, KEY_VAR, RENDERER_URL_VAR};
pub use payload::{Hub3Party, Hub3Payload, PURPOSE_CODE, payment_description};

use crate::core::{EracunError, InvoiceRecord, admit_upload};
use crate::ubl::{encode_xml_payload, parse_invoice};

/// Barcode URL for an invoice, or `None` when nothing is payable.
pub fn barcode_url(record: &InvoiceRecord, config: &Hub3Config) -> Result<Option<String>, EracunError> {
    let Some(payload) = Hub3Payload::from_record(record) else {
        return Ok(None);
    };
    let encrypted = encrypt_payload(&payload, config.key())?;
    Ok(Some(config.barcode_url_for(&encrypted)))
}

/// Everything a transport needs to answer an invoice upload.
#[derive(Debug, Clone)]
pub struct ProcessedUpload {
    pub record: InvoiceRecord,
    /// Renderer URL; `None` when the invoice has nothing left to pay.
    pub barcode_url: Option<String>,
    /// Base64 of the uploaded XML for a later [`recover_pdf`](crate::ubl::recover_pdf).
    pub xml_payload: String,
}

/// Admit, parse and encode one uploaded invoice.
pub fn process_upload(
    bytes: &[u8],
    filename: &str,
    sniffed_mime: Option<&str>,
    config: &Hub3Config,
) -> Result<ProcessedUpload, EracunError> {
    admit_upload(bytes, filename, sniffed_mime)?;
    let record = parse_invoice(bytes)?;
    let barcode_url = barcode_url(&record, config)?;

    Ok(ProcessedUpload {
        record,
        barcode_url,
        xml_payload: encode_xml_payload(bytes),
    })
}
