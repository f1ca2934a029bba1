use thiserror::Error;

/// Result type for semmeta operations
pub type Result<T> = std::result::Result<T, SemMetaError>;

/// Error types for semmeta operations
///
/// Only the I/O boundary produces these. Decoding, reconciling, sanitizing
/// and projecting never fail; they degrade to empty or absent values.
#[derive(Error, Debug)]
pub enum SemMetaError {
    /// TIFF reading error
    #[error("TIFF error: {0}")]
    TiffError(String),

    /// Input file does not exist or is not a regular file
    #[error("File not found: {0}")]
    NotFound(String),

    /// Input file does not carry a .tif/.tiff extension
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic extraction error
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper conversions
impl From<String> for SemMetaError {
    fn from(s: String) -> Self {
        SemMetaError::ExtractionError(s)
    }
}

impl From<&str> for SemMetaError {
    fn from(s: &str) -> Self {
        SemMetaError::ExtractionError(s.to_string())
    }
}

// Convert tiff decoder errors
impl From<tiff::TiffError> for SemMetaError {
    fn from(e: tiff::TiffError) -> Self {
        SemMetaError::TiffError(format!("{}", e))
    }
}
