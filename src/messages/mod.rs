use tokio::sync::oneshot;

use crate::cart_actor::CartOutcome;
use crate::domain::Cart;

pub type ServiceResponse<T> = oneshot::Sender<T>;

/// New quantity requested for a product already in the cart.
///
/// `amount` is signed so callers can pass a decremented value as is; anything
/// below 1 is ignored by the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: u64,
    pub amount: i64,
}

/// Typed messages for the cart actor. Each variant carries its parameters and a
/// oneshot channel for the response.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: u64,
        respond_to: ServiceResponse<CartOutcome>,
    },
    RemoveProduct {
        product_id: u64,
        respond_to: ServiceResponse<CartOutcome>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<CartOutcome>,
    },
    GetCart {
        respond_to: ServiceResponse<Cart>,
    },
    Shutdown,
}
