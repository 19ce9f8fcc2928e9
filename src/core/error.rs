use thiserror::Error;

/// Errors that can occur while admitting, parsing, or encoding an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EracunError {
    /// The input is not well-formed XML. Carries every diagnostic the parser produced.
    #[error("XML parse error:\n{}", .diagnostics.join("\n"))]
    Xml { diagnostics: Vec<String> },

    /// Upload rejected before parsing (size, type, or empty body).
    #[error("upload rejected: {0}")]
    Upload(String),

    /// The round-tripped XML payload could not be decoded.
    #[error("invalid XML payload: {0}")]
    Payload(String),

    /// The document carries no PDF attachment.
    #[error("no PDF attachment found in the XML document")]
    AttachmentMissing,

    /// The declared PDF attachment is not valid base64.
    #[error("attachment is not valid base64: {0}")]
    AttachmentEncoding(String),

    /// The attachment decodes but does not start with the `%PDF` signature.
    #[error("attachment is not a PDF (missing %PDF signature)")]
    AttachmentNotPdf,

    /// Invalid process configuration (encryption key, renderer URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The barcode payload could not be serialized.
    #[error("cannot JSON-encode payload: {0}")]
    Json(String),

    /// No initialization vector could be drawn from the system RNG.
    #[error("cannot generate IV: {0}")]
    IvGeneration(String),

    /// The cipher rejected the key or IV length.
    #[error("cannot determine key/IV length for AES-256-CBC")]
    CipherLength,

    /// Block encryption failed.
    #[error("AES-256-CBC encryption failed")]
    Encryption,

    /// An encrypted payload could not be decoded or decrypted.
    #[error("cannot decrypt payload: {0}")]
    Decryption(String),
}

impl EracunError {
    /// Build an [`EracunError::Xml`] from a single diagnostic.
    pub fn xml(diagnostic: impl Into<String>) -> Self {
        Self::Xml {
            diagnostics: vec![diagnostic.into()],
        }
    }
}
