//! Stateless PDF download round-trip.
//!
//! Instead of keeping the parsed invoice on the server, the caller receives
//! the original XML as base64 ([`encode_xml_payload`]) and sends it back with
//! the download request; [`recover_pdf`] re-admits, re-parses and decodes it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use super::extract::parse_invoice;
use crate::core::{EracunError, MAX_UPLOAD_BYTES, admit_xml_body};

/// A decoded PDF ready to be sent as a file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredPdf {
    pub bytes: Vec<u8>,
    /// Sanitized file name for `Content-Disposition`.
    pub filename: String,
}

/// Longest base64 text that can decode to an admissible XML body.
const MAX_PAYLOAD_LEN: usize = MAX_UPLOAD_BYTES.div_ceil(3) * 4;

/// Base64 of the original XML, handed to the caller for a later download.
pub fn encode_xml_payload(xml: &[u8]) -> String {
    STANDARD.encode(xml)
}

/// Recover the embedded PDF from a round-tripped XML payload.
pub fn recover_pdf(xml_payload: &str) -> Result<RecoveredPdf, EracunError> {
    let compact: String = xml_payload.split_whitespace().collect();
    if compact.len() > MAX_PAYLOAD_LEN {
        return Err(EracunError::Upload(format!(
            "XML payload too large ({} base64 chars, max {MAX_PAYLOAD_LEN})",
            compact.len()
        )));
    }
    let xml = STANDARD
        .decode(compact)
        .map_err(|e| EracunError::Payload(e.to_string()))?;
    admit_xml_body(&xml)?;

    let record = parse_invoice(&xml)?;
    let attachment = record.attachment.as_ref().ok_or(EracunError::AttachmentMissing)?;
    let bytes = attachment.decode()?;

    let filename = if attachment.filename.is_empty() {
        let id = if record.invoice_id.is_empty() {
            "download"
        } else {
            &record.invoice_id
        };
        format!("racun_{id}.pdf")
    } else {
        attachment.filename.clone()
    };

    debug!(size = bytes.len(), "embedded PDF recovered");
    Ok(RecoveredPdf {
        bytes,
        filename: sanitize_filename(&filename),
    })
}

/// Replace every run of characters outside `[A-Za-z0-9._-]` with one `_`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}
