//! Read-only access to the remote product and stock service.

mod error;
pub mod http;
pub mod local;

pub use error::*;
pub use http::HttpCatalog;
pub use local::{CatalogEntry, LocalCatalog};

use async_trait::async_trait;

use crate::domain::{Product, Stock};

/// Lookup port used by the cart to fetch catalog data by product id.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_product(&self, product_id: u64) -> Result<Product, CatalogError>;

    async fn fetch_stock(&self, product_id: u64) -> Result<Stock, CatalogError>;
}
