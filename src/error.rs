use std::io;
use thiserror::Error;

/// Result type for corpus generation
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Unified error type for all corpus operations
#[derive(Debug, Error)]
pub enum CorpusError {
    // Encoding errors
    #[error("Length too large to encode: {len} bytes (max {max})")]
    LengthTooLarge { len: usize, max: usize },

    #[error("Periodic header of {header} bytes does not fit in a {period}-byte period")]
    HeaderExceedsPeriod { header: usize, period: usize },

    #[error("Period must be non-zero")]
    ZeroPeriod,

    // Decoding errors
    #[error("Truncated input: {0}")]
    Truncated(String),

    #[error("Invalid TLV: {0}")]
    InvalidTlv(String),

    #[error("Invalid capture magic: {0:08x}")]
    InvalidMagic(u32),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for CorpusError {
    fn from(err: toml::de::Error) -> Self {
        CorpusError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for CorpusError {
    fn from(err: toml::ser::Error) -> Self {
        CorpusError::Toml(err.to_string())
    }
}
