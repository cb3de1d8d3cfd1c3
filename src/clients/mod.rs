#[macro_use]
mod macros;

use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::cart_actor::{CartError, CartOutcome};
use crate::domain::Cart;
use crate::messages::{CartRequest, UpdateProductAmount};

/// Cloneable handle to a running [`CartService`](crate::cart_actor::CartService).
///
/// Operations resolve normally even when they fail: failures come back as
/// [`CartOutcome::Rejected`] after the notifier has been told. `Err` only means the
/// cart actor is gone.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    observer: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, observer: watch::Receiver<Cart>) -> Self {
        Self { sender, observer }
    }

    /// Returns a receiver that sees every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.observer.clone()
    }

    /// The last committed cart, without a round trip to the actor.
    pub fn current(&self) -> Cart {
        self.observer.borrow().clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CartClient => fn add_product(product_id: u64) -> CartOutcome as CartRequest::AddProduct);
client_method!(CartClient => fn remove_product(product_id: u64) -> CartOutcome as CartRequest::RemoveProduct);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> CartOutcome as CartRequest::UpdateProductAmount);
client_method!(CartClient => fn get_cart() -> Cart as CartRequest::GetCart);
