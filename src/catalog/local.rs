//! In-process catalog served by a [`ResourceActor`].
//!
//! Stands in for the remote product service in the demo binary and in tests:
//! every lookup goes through the actor mailbox, so availability changes made with
//! [`LocalCatalog::restock`] are visible to the very next stock check.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{CatalogApi, CatalogError};
use crate::actor_framework::{Entity, FrameworkError, ResourceActor, ResourceClient};
use crate::domain::{Product, Stock};

/// A catalog record together with the units held in inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,
    pub stock: u32,
}

impl CatalogEntry {
    pub fn new(product: Product, stock: u32) -> Self {
        Self { product, stock }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogPatch {
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

#[derive(Debug, Clone)]
pub enum CatalogAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
}

#[derive(Debug, Clone)]
pub enum CatalogActionResult {
    StockLevel(u32),
}

impl Entity for CatalogEntry {
    type Id = u64;
    type Patch = CatalogPatch;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;

    fn id(&self) -> &u64 {
        &self.product.id
    }

    fn on_insert(&mut self) -> Result<(), FrameworkError> {
        if self.product.title.trim().is_empty() {
            return Err(FrameworkError::Rejected(format!("product {} has no title", self.product.id)));
        }
        Ok(())
    }

    fn on_update(&mut self, patch: CatalogPatch) -> Result<(), FrameworkError> {
        if let Some(price) = patch.price {
            self.product.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CatalogAction) -> Result<CatalogActionResult, FrameworkError> {
        match action {
            CatalogAction::CheckStock => Ok(CatalogActionResult::StockLevel(self.stock)),
        }
    }
}

/// Client for the in-process catalog actor.
#[derive(Clone)]
pub struct LocalCatalog {
    inner: ResourceClient<CatalogEntry>,
}

impl LocalCatalog {
    /// Creates the catalog actor and its client. The caller spawns `actor.run()`.
    pub fn new(buffer_size: usize) -> (ResourceActor<CatalogEntry>, Self) {
        let (actor, inner) = ResourceActor::new(buffer_size);
        (actor, Self::from_client(inner))
    }

    pub fn from_client(inner: ResourceClient<CatalogEntry>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, entry), fields(product_id = entry.product.id, stock = entry.stock))]
    pub async fn add_entry(&self, entry: CatalogEntry) -> Result<u64, CatalogError> {
        debug!("Sending request");
        self.inner.insert(entry).await.map_err(map_framework_error)
    }

    /// Sets the units available for `product_id`.
    #[instrument(skip(self))]
    pub async fn restock(&self, product_id: u64, stock: u32) -> Result<(), CatalogError> {
        debug!("Sending request");
        let patch = CatalogPatch {
            stock: Some(stock),
            ..CatalogPatch::default()
        };
        self.inner
            .update(product_id, patch)
            .await
            .map(|_| ())
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => CatalogError::NotFound(product_id),
                other => map_framework_error(other),
            })
    }
}

fn map_framework_error(e: FrameworkError) -> CatalogError {
    match e {
        FrameworkError::Rejected(reason) => CatalogError::Rejected(reason),
        other => CatalogError::ActorCommunicationError(other.to_string()),
    }
}

#[async_trait]
impl CatalogApi for LocalCatalog {
    #[instrument(skip(self))]
    async fn fetch_product(&self, product_id: u64) -> Result<Product, CatalogError> {
        debug!("Sending request");
        match self.inner.get(product_id).await {
            Ok(Some(entry)) => Ok(entry.product),
            Ok(None) => Err(CatalogError::NotFound(product_id)),
            Err(e) => Err(map_framework_error(e)),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_stock(&self, product_id: u64) -> Result<Stock, CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(product_id, CatalogAction::CheckStock).await {
            Ok(CatalogActionResult::StockLevel(level)) => Ok(Stock::new(product_id, level)),
            Err(FrameworkError::NotFound(_)) => Err(CatalogError::NotFound(product_id)),
            Err(e) => Err(map_framework_error(e)),
        }
    }
}
