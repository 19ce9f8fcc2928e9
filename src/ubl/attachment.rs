use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use super::document::Document;
use crate::core::{EracunError, PdfAttachment};

/// First four bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

const PDF_MIME: &str = "application/pdf";
const DEFAULT_FILENAME: &str = "racun.pdf";

const EMBEDDED_PDF: &str = "/ubl:Invoice/cac:AdditionalDocumentReference/cac:Attachment\
/cbc:EmbeddedDocumentBinaryObject[@mimeCode=\"application/pdf\"]";
const EMBEDDED_ANY: &str = "/ubl:Invoice/cac:AdditionalDocumentReference/cac:Attachment\
/cbc:EmbeddedDocumentBinaryObject";

/// Find the embedded PDF of an invoice.
///
/// A binary object tagged `application/pdf` is preferred; otherwise the
/// first embedded object is taken and kept only if its MIME code or its
/// file name says PDF. The body is not decoded here.
pub fn find_pdf_attachment(doc: &Document) -> Option<PdfAttachment> {
    let node = doc
        .first(EMBEDDED_PDF, None)
        .or_else(|| doc.first(EMBEDDED_ANY, None))?;

    let mime = node.attribute("mimeCode").unwrap_or_default().trim();
    let filename = node.attribute("filename").unwrap_or_default().trim();

    let pdf_by_mime = mime.eq_ignore_ascii_case(PDF_MIME);
    let pdf_by_name = filename.len() >= 4
        && filename
            .get(filename.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".pdf"));
    if !pdf_by_mime && !pdf_by_name {
        debug!(mime, filename, "embedded object is not a PDF, ignored");
        return None;
    }

    let content_b64: String = node.text().split_whitespace().collect();
    let size = decoded_size(&content_b64);

    Some(PdfAttachment {
        mime_type: if mime.is_empty() { PDF_MIME } else { mime }.to_string(),
        filename: if filename.is_empty() { DEFAULT_FILENAME } else { filename }.to_string(),
        size,
        content_b64,
    })
}

/// Decoded byte length of a base64 body, computed from its length and
/// trailing `=` padding without decoding.
pub fn decoded_size(b64: &str) -> usize {
    if b64.is_empty() {
        return 0;
    }
    let padding = if b64.ends_with("==") {
        2
    } else if b64.ends_with('=') {
        1
    } else {
        0
    };
    (b64.len() * 3 / 4).saturating_sub(padding)
}

impl PdfAttachment {
    /// Decode the body and check the PDF signature.
    ///
    /// Invalid base64 and a missing `%PDF` header are reported as distinct
    /// errors, both different from [`EracunError::AttachmentMissing`].
    pub fn decode(&self) -> Result<Vec<u8>, EracunError> {
        if self.content_b64.is_empty() {
            return Err(EracunError::AttachmentMissing);
        }
        let bytes = STANDARD
            .decode(&self.content_b64)
            .map_err(|e| EracunError::AttachmentEncoding(e.to_string()))?;
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(EracunError::AttachmentNotPdf);
        }
        Ok(bytes)
    }
}
