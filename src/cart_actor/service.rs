use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use super::{CartError, CartOperation, CartOutcome};
use crate::catalog::{CatalogApi, CatalogError};
use crate::clients::CartClient;
use crate::domain::{Cart, CartItem};
use crate::messages::{CartRequest, ServiceResponse, UpdateProductAmount};
use crate::notify::Notifier;
use crate::store::CartStore;

/// The cart manager actor.
///
/// Owns the in-memory cart and handles one request at a time, so each
/// operation's fetch-compute-persist-publish sequence runs without interleaving.
/// Every mutation computes the complete next cart, persists it, and only then
/// replaces the in-memory cart and publishes it to observers.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    store: CartStore,
    catalog: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
    observers: watch::Sender<Cart>,
}

impl CartService {
    /// Hydrates the cart from `store` and returns the actor with its client.
    pub async fn new(
        buffer_size: usize,
        store: CartStore,
        catalog: Arc<dyn CatalogApi>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, CartClient) {
        let cart = store.load_cart().await;
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (observers, observer) = watch::channel(cart.clone());
        let service = Self {
            receiver,
            cart,
            store,
            catalog,
            notifier,
            observers,
        };
        (service, CartClient::new(sender, observer))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(lines = self.cart.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct { product_id, respond_to } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    self.handle_remove_product(product_id, respond_to).await;
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    self.handle_update_product_amount(update, respond_to).await;
                }
                CartRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(self.cart.clone());
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_add_product(&mut self, product_id: u64, respond_to: ServiceResponse<CartOutcome>) {
        debug!("Processing add_product request");
        let outcome = self.add_product(product_id).await;
        let _ = respond_to.send(outcome);
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_remove_product(&mut self, product_id: u64, respond_to: ServiceResponse<CartOutcome>) {
        debug!("Processing remove_product request");
        let result = match self.cart.without(product_id) {
            Ok(next) => self.commit(next).await,
            Err(e) => Err(e),
        };
        let outcome = self.settle(CartOperation::Remove, result);
        let _ = respond_to.send(outcome);
    }

    #[instrument(fields(product_id = update.product_id, amount = update.amount), skip(self, update, respond_to))]
    async fn handle_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
        respond_to: ServiceResponse<CartOutcome>,
    ) {
        debug!("Processing update_product_amount request");
        let outcome = self.update_product_amount(update.product_id, update.amount).await;
        let _ = respond_to.send(outcome);
    }

    /// Adds one unit of `product_id`. A product already in the cart goes through
    /// the quantity update path, which owns the stock check.
    async fn add_product(&mut self, product_id: u64) -> CartOutcome {
        if let Some(line) = self.cart.find(product_id) {
            let amount = i64::from(line.amount) + 1;
            debug!(amount, "Product already in cart, incrementing");
            return self.update_product_amount(product_id, amount).await;
        }

        let result = self.add_new_product(product_id).await;
        self.settle(CartOperation::Add, result)
    }

    async fn add_new_product(&mut self, product_id: u64) -> Result<Cart, CartError> {
        self.verify_stock_amount(product_id).await?;

        let product = self.catalog.fetch_product(product_id).await?;
        if product.id != product_id {
            return Err(CatalogError::Decode(format!("requested product {product_id}, catalog returned {}", product.id)).into());
        }

        let next = self.cart.with_item(CartItem::new(product, 1))?;
        self.commit(next).await
    }

    async fn update_product_amount(&mut self, product_id: u64, amount: i64) -> CartOutcome {
        if amount <= 0 {
            debug!(amount, "Ignoring non-positive amount");
            return CartOutcome::Ignored;
        }

        let result = self.set_amount(product_id, amount).await;
        self.settle(CartOperation::UpdateAmount, result)
    }

    async fn set_amount(&mut self, product_id: u64, amount: i64) -> Result<Cart, CartError> {
        let available = self.verify_stock_amount(product_id).await?;

        let requested = u32::try_from(amount)
            .ok()
            .filter(|requested| *requested <= available)
            .ok_or(CartError::OutOfStock {
                product_id,
                requested: amount,
                available,
            })?;

        let next = self.cart.with_amount(product_id, requested)?;
        self.commit(next).await
    }

    /// Fetches fresh stock for `product_id`. An empty stock aborts the operation.
    #[instrument(skip(self))]
    async fn verify_stock_amount(&self, product_id: u64) -> Result<u32, CartError> {
        let stock = self.catalog.fetch_stock(product_id).await?;
        if !stock.is_available() {
            return Err(CartError::StockUnavailable(product_id));
        }
        debug!(available = stock.amount, "Stock verified");
        Ok(stock.amount)
    }

    /// Persists `next`, then makes it the current cart and publishes it.
    async fn commit(&mut self, next: Cart) -> Result<Cart, CartError> {
        self.store.save_cart(&next).await?;
        self.cart = next.clone();
        self.observers.send_replace(next.clone());
        Ok(next)
    }

    fn settle(&self, operation: CartOperation, result: Result<Cart, CartError>) -> CartOutcome {
        match result {
            Ok(cart) => {
                info!(?operation, lines = cart.len(), units = cart.total_amount(), "Cart updated");
                CartOutcome::Committed(cart)
            }
            Err(e) => {
                match &e {
                    CartError::Catalog(_) | CartError::Store(_) => error!(?operation, error = %e, "Cart operation failed"),
                    _ => warn!(?operation, error = %e, "Cart operation rejected"),
                }
                self.notifier.notify_error(e.notice(operation));
                CartOutcome::Rejected(e)
            }
        }
    }
}
