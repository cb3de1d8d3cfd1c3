use thiserror::Error;

use crate::catalog::CatalogError;
use crate::notify;
use crate::store::StoreError;

/// Why a cart operation left the cart unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: u64,
        requested: i64,
        available: u32,
    },
    #[error("Product {0} is out of stock")]
    StockUnavailable(u64),
    #[error("Product not in cart: {0}")]
    NotFound(u64),
    #[error("Product already in cart: {0}")]
    DuplicateItem(u64),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// The message shown to the shopper when `operation` fails with this error.
    pub fn notice(&self, operation: CartOperation) -> &'static str {
        match self {
            CartError::OutOfStock { .. } | CartError::StockUnavailable(_) => notify::OUT_OF_STOCK,
            _ => operation.failure_notice(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    pub fn failure_notice(self) -> &'static str {
        match self {
            CartOperation::Add => notify::ADD_FAILED,
            CartOperation::Remove => notify::REMOVE_FAILED,
            CartOperation::UpdateAmount => notify::UPDATE_FAILED,
        }
    }
}
