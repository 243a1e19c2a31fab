//! Error types for Stackwise

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An advisory analyzer failed; its output is dropped but others still run
    #[error("Analyzer '{analyzer}' failed: {message}")]
    Analyzer { analyzer: String, message: String },

    /// A safety-critical analyzer failed; results must not be shown without it
    #[error("Safety-critical analyzer '{analyzer}' failed: {message}")]
    CriticalAnalyzer { analyzer: String, message: String },
}

impl Error {
    /// Whether this error must be surfaced instead of returning partial results
    pub fn is_critical(&self) -> bool {
        matches!(self, Error::CriticalAnalyzer { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
