use crate::domain::model::{Product, ProductId, Stock};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable key-value slot the cart is persisted to.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn write(&self, key: &str, value: &str)
        -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> Result<Stock>;
    async fn product(&self, product_id: ProductId) -> Result<Product>;
}

/// Fire-and-forget channel for user-facing error messages.
pub trait NotificationSink: Send + Sync {
    fn notify_error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn inventory_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn request_timeout_seconds(&self) -> Option<u64>;
    fn strict_load(&self) -> bool;
}
