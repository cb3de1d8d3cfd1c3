use std::sync::Arc;

use cart_actor::app_system::{setup_tracing, CartConfig, CartSystem};
use cart_actor::catalog::CatalogEntry;
use cart_actor::domain::{Cart, Product};
use cart_actor::messages::UpdateProductAmount;
use cart_actor::notify::TracingNotifier;
use cart_actor::store::JsonFileStore;
use tracing::{error, info, Instrument};

fn demo_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            Product::new(1, "Tênis de Caminhada Leve Confortável", 179.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"),
            3,
        ),
        CatalogEntry::new(
            Product::new(2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg"),
            5,
        ),
        CatalogEntry::new(
            Product::new(3, "Tênis Adidas Duramo Lite 2.0", 219.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis3.jpg"),
            2,
        ),
    ]
}

fn log_cart(cart: &Cart) {
    for line in cart.items() {
        info!(product_id = line.id(), title = %line.product.title, amount = line.amount, "Cart line");
    }
    info!(lines = cart.len(), units = cart.total_amount(), "Cart contents");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    info!(storage_dir = %config.storage_dir.display(), "Starting cart demo");

    let system = match config.api_url {
        Some(_) => CartSystem::new(&config).await,
        None => {
            let backend = Arc::new(JsonFileStore::new(config.storage_dir.clone()));
            CartSystem::with_local_catalog(&config, backend, Arc::new(TracingNotifier), demo_catalog()).await
        }
    }
    .map_err(|e| e.to_string())?;

    let client = system.cart_client.clone();
    log_cart(&client.current());

    let span = tracing::info_span!("shopping_session");
    async {
        for product_id in [1, 1, 2, 3, 3, 3] {
            match client.add_product(product_id).await {
                Ok(outcome) => info!(product_id, committed = outcome.is_committed(), "add_product finished"),
                Err(e) => error!(error = %e, "Cart actor unavailable"),
            }
        }

        let update = UpdateProductAmount { product_id: 2, amount: 4 };
        if let Err(e) = client.update_product_amount(update).await {
            error!(error = %e, "Cart actor unavailable");
        }

        // Decrementing below 1 is ignored.
        let update = UpdateProductAmount { product_id: 1, amount: 0 };
        if let Err(e) = client.update_product_amount(update).await {
            error!(error = %e, "Cart actor unavailable");
        }

        if let Err(e) = client.remove_product(42).await {
            error!(error = %e, "Cart actor unavailable");
        }
    }
    .instrument(span)
    .await;

    match client.get_cart().await {
        Ok(cart) => log_cart(&cart),
        Err(e) => error!(error = %e, "Could not read cart"),
    }

    drop(client);
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Cart demo completed");
    Ok(())
}
