use crate::core::{ConfigProvider, InventoryService, Product, ProductId, Stock};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Inventory client for the storefront REST API (`/stock/{id}`, `/products/{id}`).
#[derive(Debug, Clone)]
pub struct HttpInventory {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl HttpInventory {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout: None,
            headers: HashMap::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let inventory = Self::new(config.inventory_url());
        match config.request_timeout_seconds() {
            Some(seconds) => inventory.with_timeout(Duration::from_secs(seconds)),
            None => inventory,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    fn url(&self, resource: &str, product_id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, product_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let mut request = self.client.get(&url);

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making inventory request to: {}", url);
        let response = request.send().await?;
        tracing::debug!("Inventory response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CartError::UpstreamStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl InventoryService for HttpInventory {
    async fn stock(&self, product_id: ProductId) -> Result<Stock> {
        self.get_json(self.url("stock", product_id)).await
    }

    async fn product(&self, product_id: ProductId) -> Result<Product> {
        self.get_json(self.url("products", product_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_stock() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 1, "amount": 3}));
        });

        let inventory = HttpInventory::new(server.base_url());
        let stock = inventory.stock(ProductId::new(1)).await.unwrap();

        stock_mock.assert();
        assert_eq!(stock.amount, 3);
        assert_eq!(stock.product_id, Some(ProductId::new(1)));
    }

    #[tokio::test]
    async fn test_fetch_product_in_storefront_shape() {
        let server = MockServer::start();
        let product_mock = server.mock(|when, then| {
            when.method(GET).path("/products/2");
            then.status(200).json_body(serde_json::json!({
                "id": 2,
                "title": "Tenis VR Caminhada Confortavel",
                "price": 139.9,
                "image": "https://cdn.example.com/2.jpg"
            }));
        });

        // trailing slash must not produce '//products'
        let inventory = HttpInventory::new(format!("{}/", server.base_url()));
        let product = inventory.product(ProductId::new(2)).await.unwrap();

        product_mock.assert();
        assert_eq!(product.name, "Tenis VR Caminhada Confortavel");
        assert_eq!(product.image_url, "https://cdn.example.com/2.jpg");
    }

    #[tokio::test]
    async fn test_not_found_is_upstream_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/99");
            then.status(404).json_body(serde_json::json!({}));
        });

        let inventory = HttpInventory::new(server.base_url());
        let err = inventory.stock(ProductId::new(99)).await.unwrap_err();

        match err {
            CartError::UpstreamStatus { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/stock/99"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(200).body("amount: lots");
        });

        let inventory = HttpInventory::new(server.base_url());
        let err = inventory.stock(ProductId::new(1)).await.unwrap_err();

        assert!(matches!(err, CartError::Api(_)));
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/stock/5")
                .header("X-Client", "cart-test");
            then.status(200).json_body(serde_json::json!({"id": 5, "amount": 1}));
        });

        let headers = HashMap::from([("X-Client".to_string(), "cart-test".to_string())]);
        let inventory = HttpInventory::new(server.base_url())
            .with_headers(headers)
            .with_timeout(Duration::from_secs(5));
        inventory.stock(ProductId::new(5)).await.unwrap();

        stock_mock.assert();
    }
}
