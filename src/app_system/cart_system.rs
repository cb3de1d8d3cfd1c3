use std::sync::Arc;

use tracing::{error, info};

use super::{CartConfig, SystemError};
use crate::cart_actor::CartService;
use crate::catalog::{CatalogApi, CatalogEntry, HttpCatalog, LocalCatalog};
use crate::clients::CartClient;
use crate::notify::{Notifier, TracingNotifier};
use crate::store::{CartStore, JsonFileStore, KeyValueStore};

/// Starts the cart actor with its collaborators and owns the spawned tasks.
pub struct CartSystem {
    pub cart_client: CartClient,
    /// Present when the system runs against the in-process catalog.
    pub local_catalog: Option<LocalCatalog>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Wires the cart to the HTTP catalog at `config.api_url`, or to an empty
    /// in-process catalog when no URL is configured, with a file-backed store and
    /// log notifications.
    ///
    /// # Errors
    /// `Catalog` when the HTTP catalog client cannot be built.
    pub async fn new(config: &CartConfig) -> Result<Self, SystemError> {
        let backend = Arc::new(JsonFileStore::new(config.storage_dir.clone()));
        let notifier = Arc::new(TracingNotifier);
        match &config.api_url {
            Some(url) => {
                let catalog = Arc::new(HttpCatalog::new(url, config.request_timeout)?);
                info!(api_url = %catalog.base_url(), "Using remote catalog");
                Ok(Self::with_parts(config, backend, catalog, notifier).await)
            }
            None => Self::with_local_catalog(config, backend, notifier, Vec::new()).await,
        }
    }

    /// Starts an in-process catalog seeded with `entries` and wires the cart to it.
    ///
    /// # Errors
    /// `Catalog` when an entry is rejected by the catalog actor.
    pub async fn with_local_catalog(
        config: &CartConfig,
        backend: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        entries: Vec<CatalogEntry>,
    ) -> Result<Self, SystemError> {
        let (catalog_actor, catalog) = LocalCatalog::new(config.mailbox_size);
        let catalog_handle = tokio::spawn(catalog_actor.run());
        for entry in entries {
            catalog.add_entry(entry).await?;
        }
        info!("Using in-process catalog");

        let mut system = Self::with_parts(config, backend, Arc::new(catalog.clone()), notifier).await;
        system.local_catalog = Some(catalog);
        system.handles.push(catalog_handle);
        Ok(system)
    }

    /// Starts the cart actor on explicit collaborators.
    pub async fn with_parts(
        config: &CartConfig,
        backend: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn CatalogApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = CartStore::with_key(backend, config.storage_key.clone());
        let (service, cart_client) = CartService::new(config.mailbox_size, store, catalog, notifier).await;
        let handle = tokio::spawn(service.run());

        Self {
            cart_client,
            local_catalog: None,
            handles: vec![handle],
        }
    }

    /// Stops the cart actor, then waits for every task to finish.
    ///
    /// # Errors
    /// `ActorTask` when a task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cart system...");
        // The cart actor may already be gone; dropping the clients below stops it either way.
        if let Err(e) = self.cart_client.shutdown().await {
            info!(error = %e, "Cart actor already stopped");
        }
        drop(self.cart_client);
        drop(self.local_catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(format!("{e:?}")));
            }
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
