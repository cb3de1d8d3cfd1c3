//! # Cart Actor
//!
//! Client-side shopping-cart state for a storefront, built as an actor system.
//!
//! - **Domain types** - plain serde structs for catalog and cart data → [`domain::Product`], [`domain::Cart`]
//! - **Cart manager** - one actor owns the cart and serializes every operation → [`cart_actor::CartService`]
//! - **Client** - cloneable handle with macro-generated, instrumented methods → [`clients::CartClient`]
//! - **Collaborators** - ports for the product/stock service, the blob store and the notification sink
//!   → [`catalog::CatalogApi`], [`store::KeyValueStore`], [`notify::Notifier`]
//! - **System coordinator** - wiring, startup and shutdown → [`app_system::CartSystem`]
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let system = CartSystem::new(&CartConfig::from_env()?).await?;
//!
//! system.cart_client.add_product(1).await?;
//! system.cart_client.update_product_amount(UpdateProductAmount { product_id: 1, amount: 3 }).await?;
//! system.cart_client.remove_product(1).await?;
//!
//! system.shutdown().await?;
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod domain;
pub mod messages;
pub mod notify;
pub mod store;

#[cfg(test)]
mod mock_framework;
