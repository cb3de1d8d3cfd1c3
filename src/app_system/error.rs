use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors raised while starting or stopping the cart system.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
