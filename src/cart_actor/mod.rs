//! The cart manager: a single actor owning the shopper's cart.

pub mod error;
pub mod service;

pub use error::*;
pub use service::CartService;

use crate::domain::Cart;

/// How a cart operation resolved.
///
/// Rejections have already been reported to the notifier when the caller sees them.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOutcome {
    /// The new cart was persisted and is now the current cart.
    Committed(Cart),
    /// Nonsensical input (a non-positive amount); nothing happened.
    Ignored,
    /// The operation failed and the cart is unchanged.
    Rejected(CartError),
}

impl CartOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CartOutcome::Committed(_))
    }

    pub fn cart(&self) -> Option<&Cart> {
        match self {
            CartOutcome::Committed(cart) => Some(cart),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CartError> {
        match self {
            CartOutcome::Rejected(error) => Some(error),
            _ => None,
        }
    }
}
