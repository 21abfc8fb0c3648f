use crate::core::cart::CartStore;
use crate::core::{Cart, InventoryService, NotificationSink, ProductId, Storage, UpdateProductAmount};
use crate::utils::error::{CartError, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            CartOperation::Add => "Failed to add product",
            CartOperation::Remove => "Failed to remove product",
            CartOperation::UpdateAmount => "Failed to change product quantity",
        }
    }
}

pub const STOCK_EXCEEDED_MESSAGE: &str = "Requested quantity is out of stock";

/// Message shown to the user for a failed operation, or `None` if the failure is silent.
pub fn notification_for(operation: CartOperation, error: &CartError) -> Option<&'static str> {
    if error.is_silent() {
        None
    } else if error.is_stock_exceeded() {
        Some(STOCK_EXCEEDED_MESSAGE)
    } else {
        Some(operation.failure_message())
    }
}

/// Handle to a shared [`CartStore`] that reports failures to a [`NotificationSink`]
/// instead of returning them. Clone it into every consumer that needs the cart.
pub struct CartContext<I: InventoryService, S: Storage, N: NotificationSink> {
    store: Arc<CartStore<I, S>>,
    notifier: Arc<N>,
}

impl<I: InventoryService, S: Storage, N: NotificationSink> Clone for CartContext<I, S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<I: InventoryService, S: Storage, N: NotificationSink> CartContext<I, S, N> {
    pub fn new(store: CartStore<I, S>, notifier: N) -> Self {
        Self::from_shared(Arc::new(store), Arc::new(notifier))
    }

    pub fn from_shared(store: Arc<CartStore<I, S>>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    pub async fn cart(&self) -> Cart {
        self.store.cart().await
    }

    pub async fn add_product(&self, product_id: ProductId) {
        let result = self.store.add_product(product_id).await;
        self.report(CartOperation::Add, result);
    }

    pub async fn remove_product(&self, product_id: ProductId) {
        let result = self.store.remove_product(product_id).await;
        self.report(CartOperation::Remove, result);
    }

    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let result = self.store.update_product_amount(request).await;
        self.report(CartOperation::UpdateAmount, result);
    }

    fn report(&self, operation: CartOperation, result: Result<()>) {
        let Err(error) = result else {
            return;
        };

        match notification_for(operation, &error) {
            Some(message) => {
                tracing::warn!(
                    "❌ {:?} failed: {} (Category: {:?})",
                    operation,
                    error,
                    error.category()
                );
                self.notifier.notify_error(message);
            }
            None => tracing::debug!("{:?} ignored: {}", operation, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ProductId {
        ProductId::new(raw)
    }

    #[test]
    fn test_stock_exceeded_uses_shared_message() {
        let err = CartError::StockExceeded {
            product_id: id(1),
            requested: 2,
            available: 1,
        };
        assert_eq!(
            notification_for(CartOperation::Add, &err),
            Some(STOCK_EXCEEDED_MESSAGE)
        );
        assert_eq!(
            notification_for(CartOperation::UpdateAmount, &err),
            Some(STOCK_EXCEEDED_MESSAGE)
        );
    }

    #[test]
    fn test_other_failures_collapse_per_operation() {
        let missing = CartError::ProductNotInCart { product_id: id(1) };
        let upstream = CartError::UpstreamStatus {
            url: "http://inventory.test/stock/1".to_string(),
            status: 500,
        };

        assert_eq!(
            notification_for(CartOperation::Remove, &missing),
            Some("Failed to remove product")
        );
        assert_eq!(
            notification_for(CartOperation::UpdateAmount, &missing),
            Some("Failed to change product quantity")
        );
        assert_eq!(
            notification_for(CartOperation::Add, &upstream),
            Some("Failed to add product")
        );
        assert_eq!(
            notification_for(CartOperation::UpdateAmount, &upstream),
            Some("Failed to change product quantity")
        );
    }

    #[test]
    fn test_invalid_amount_is_silent() {
        let err = CartError::InvalidAmount {
            product_id: id(1),
            amount: 0,
        };
        assert_eq!(notification_for(CartOperation::UpdateAmount, &err), None);
    }
}
