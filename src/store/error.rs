use thiserror::Error;

/// Errors raised by the persistent key-value backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Cart serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
