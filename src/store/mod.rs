//! Durable storage of the cart under a single fixed key.

mod error;
pub mod file;
pub mod memory;

pub use error::*;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::domain::{Cart, CartItem};

/// Key under which the storefront keeps its cart.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// A get/set blob store scoped to one user profile.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites the value stored under `key` as a whole.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Succeeds even if the key does not exist.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and writes the cart as a JSON array of lines under one key.
#[derive(Clone)]
pub struct CartStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, DEFAULT_CART_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored cart. A missing, unreadable or corrupt blob yields an
    /// empty cart.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load_cart(&self) -> Cart {
        let blob = match self.backend.get(&self.key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("No stored cart");
                return Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "Stored cart could not be read, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Vec<CartItem>>(&blob) {
            Ok(items) => {
                let cart = Cart::from_items(items);
                debug!(lines = cart.len(), "Stored cart loaded");
                cart
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is corrupt, starting empty");
                Cart::new()
            }
        }
    }

    /// Loads the stored line for a single product.
    pub async fn load_item(&self, product_id: u64) -> Option<CartItem> {
        self.load_cart().await.find(product_id).cloned()
    }

    /// Serializes the whole cart and overwrites the stored blob.
    #[instrument(skip(self, cart), fields(key = %self.key, lines = cart.len()))]
    pub async fn save_cart(&self, cart: &Cart) -> Result<(), StoreError> {
        let blob = serde_json::to_string(cart).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.set(&self.key, &blob).await?;
        debug!("Cart persisted");
        Ok(())
    }

    /// Drops the stored cart; the next load starts empty.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(&self.key).await
    }
}
