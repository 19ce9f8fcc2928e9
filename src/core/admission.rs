//! Upload admission checks applied before any XML is parsed.

use super::EracunError;

/// Largest accepted XML body (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// MIME types a sniffed XML upload may report.
pub const ALLOWED_MIME_TYPES: &[&str] = &["text/xml", "application/xml", "text/plain"];

/// Admit an uploaded file.
///
/// `sniffed_mime` is the content type detected by the transport, if any.
/// When it is missing the file name must carry an `.xml` extension.
pub fn admit_upload(
    bytes: &[u8],
    filename: &str,
    sniffed_mime: Option<&str>,
) -> Result<(), EracunError> {
    check_size(bytes)?;

    match sniffed_mime.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mime) => {
            if !ALLOWED_MIME_TYPES.contains(&mime) {
                return Err(EracunError::Upload(format!(
                    "unsupported file type '{mime}', an XML file is required"
                )));
            }
        }
        None => {
            let is_xml = filename
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("xml"));
            if !is_xml {
                return Err(EracunError::Upload(
                    "unsupported file type, an XML file is required".into(),
                ));
            }
        }
    }

    check_not_blank(bytes)
}

/// Size and emptiness checks shared by uploads and round-tripped payloads.
pub fn admit_xml_body(bytes: &[u8]) -> Result<(), EracunError> {
    check_size(bytes)?;
    check_not_blank(bytes)
}

fn check_size(bytes: &[u8]) -> Result<(), EracunError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(EracunError::Upload(format!(
            "XML file too large ({} bytes, max {MAX_UPLOAD_BYTES})",
            bytes.len()
        )));
    }
    Ok(())
}

fn check_not_blank(bytes: &[u8]) -> Result<(), EracunError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(EracunError::Upload("empty file".into()));
    }
    Ok(())
}
