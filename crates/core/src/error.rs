//! Error types for presentation reading and document generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading presentations or writing outputs.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read, or write a file.
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to parse the PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParse(String),

    /// Failed to parse the legacy PPT file structure.
    #[error("PPT parsing error: {0}")]
    PptParse(String),

    /// Invalid or corrupted file.
    #[error("Invalid or corrupted file: {0}")]
    Corrupted(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// OLE/CFB container error (for PPT).
    #[error("OLE/CFB error: {0}")]
    Cfb(String),

    /// Failed to build or write a TOC document.
    #[error("DOCX write error: {0}")]
    DocxWrite(String),
}
