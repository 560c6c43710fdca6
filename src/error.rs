//! Error types for the vault SDK

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vault SDK
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Classification errors
    #[error("Not a recognized vault: {0}")]
    UnrecognizedVault(String),

    // Contract call errors
    #[error("Contract error: {0}")]
    ContractRevert(String),

    #[error("Failed to execute {method}: {message}")]
    CallFailed { method: String, message: String },

    #[error("Transaction confirmation failed: {0}")]
    Confirmation(String),

    #[error("Event not found in receipt: {0}")]
    MissingEvent(String),

    // Metadata errors
    #[error("Metadata validation failed: {0}")]
    MetadataValidation(String),

    #[error("IPFS pinning failed: {0}")]
    Ipfs(String),

    #[error("Invalid metadata URI: {0}")]
    InvalidMetadataUri(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Check if this error came from an on-chain revert
    pub fn is_revert(&self) -> bool {
        matches!(self, Error::ContractRevert(_))
    }

    /// Check if this error was raised before any network interaction
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::MetadataValidation(_) | Error::InvalidMetadataUri(_)
        )
    }
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

// Conversion from I/O errors
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
