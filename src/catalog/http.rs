//! Reqwest-backed catalog adapter.
//!
//! Owns transport details only: URL building, timeout, HTTP status mapping and
//! JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{CatalogApi, CatalogError};
use crate::domain::{Product, Stock};

/// Catalog adapter issuing `GET {base}/products/{id}` and `GET {base}/stock/{id}`.
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// # Errors
    ///
    /// `Transport` when the base URL is invalid or the reqwest client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        Self::with_client(base_url, client)
    }

    /// Builds the adapter around a preconfigured reqwest client.
    ///
    /// # Errors
    ///
    /// `Transport` when the base URL is invalid.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, CatalogError> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| CatalogError::Transport(format!("invalid catalog url {base_url:?}: {e}")))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, product_id: u64) -> Result<T, CatalogError> {
        let url = self
            .base_url
            .join(&format!("{path}/{product_id}"))
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        debug!(%url, "Sending catalog request");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(product_id));
        }
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(format!("{url}: {e}")))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    #[instrument(skip(self))]
    async fn fetch_product(&self, product_id: u64) -> Result<Product, CatalogError> {
        self.get_json("products", product_id).await
    }

    #[instrument(skip(self))]
    async fn fetch_stock(&self, product_id: u64) -> Result<Stock, CatalogError> {
        self.get_json("stock", product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves canned responses keyed by request path until the test ends.
    async fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(route, _, _)| *route == path)
                    .map(|(_, status, body)| (*status, *body))
                    .unwrap_or((404, "{}"));
                let reply = format!(
                    "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}/api")
    }

    fn catalog(base: &str) -> HttpCatalog {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpCatalog::with_client(base, client).unwrap()
    }

    #[tokio::test]
    async fn fetches_product_and_stock() {
        let base = serve(vec![
            ("/api/products/1", 200, r#"{"id":1,"title":"Tênis de Caminhada","price":179.9,"image":"https://img/1.jpg"}"#),
            ("/api/stock/1", 200, r#"{"id":1,"amount":3}"#),
        ])
        .await;
        let catalog = catalog(&base);

        let product = catalog.fetch_product(1).await.unwrap();
        assert_eq!(product, Product::new(1, "Tênis de Caminhada", 179.9, "https://img/1.jpg"));

        let stock = catalog.fetch_stock(1).await.unwrap();
        assert_eq!(stock, Stock::new(1, 3));
    }

    #[tokio::test]
    async fn maps_status_codes_and_bad_payloads() {
        let base = serve(vec![
            ("/api/stock/2", 500, r#"{"error":"boom"}"#),
            ("/api/stock/3", 200, r#"{"id":3}"#),
        ])
        .await;
        let catalog = catalog(&format!("{base}/"));

        assert_eq!(catalog.fetch_product(9).await, Err(CatalogError::NotFound(9)));
        assert!(matches!(
            catalog.fetch_stock(2).await,
            Err(CatalogError::Status { status: 500, .. })
        ));
        assert!(matches!(catalog.fetch_stock(3).await, Err(CatalogError::Decode(_))));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpCatalog::new("not a url", Duration::from_secs(1)),
            Err(CatalogError::Transport(_))
        ));
    }
}
