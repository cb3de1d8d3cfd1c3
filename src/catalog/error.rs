use thiserror::Error;

/// Errors raised while talking to the product/stock service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog record not found: {0}")]
    NotFound(u64),
    #[error("Catalog responded with status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Catalog transport error: {0}")]
    Transport(String),
    #[error("Catalog payload could not be decoded: {0}")]
    Decode(String),
    #[error("Catalog rejected the request: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
