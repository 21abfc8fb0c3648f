use crate::core::{
    Cart, CartLineItem, ConfigProvider, InventoryService, ProductId, Storage, UpdateProductAmount,
};
use crate::utils::error::{CartError, Result};
use tokio::sync::Mutex;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Cart state plus its persisted copy.
///
/// Every mutating operation holds the cart lock from the stock lookup until the
/// commit, so concurrent callers are applied one after another and never lose
/// an update. Failures are returned as tagged [`CartError`]s and the cart is
/// left untouched; turning them into user messages is up to the caller (see
/// [`crate::core::context::CartContext`]).
pub struct CartStore<I: InventoryService, S: Storage> {
    inventory: I,
    storage: S,
    key: String,
    cart: Mutex<Cart>,
}

impl<I: InventoryService, S: Storage> CartStore<I, S> {
    /// Restores the cart saved under `key`. A missing or malformed value yields an empty cart.
    pub async fn load(inventory: I, storage: S, key: impl Into<String>) -> Result<Self> {
        Self::open(inventory, storage, key.into(), false).await
    }

    /// Like [`CartStore::load`] but malformed saved data is an error.
    pub async fn load_strict(inventory: I, storage: S, key: impl Into<String>) -> Result<Self> {
        Self::open(inventory, storage, key.into(), true).await
    }

    pub async fn from_config<C: ConfigProvider>(inventory: I, storage: S, config: &C) -> Result<Self> {
        Self::open(
            inventory,
            storage,
            config.storage_key().to_string(),
            config.strict_load(),
        )
        .await
    }

    async fn open(inventory: I, storage: S, key: String, strict: bool) -> Result<Self> {
        let restored = match storage.read(&key).await {
            Ok(None) => Ok(None),
            Ok(Some(raw)) => serde_json::from_str::<Cart>(&raw)
                .map(Some)
                .map_err(CartError::Serialization),
            Err(e @ CartError::MalformedData { .. }) => Err(e),
            Err(e) => return Err(e),
        };

        let cart = match restored {
            Ok(None) => {
                tracing::debug!("No saved cart under '{}', starting empty", key);
                Cart::new()
            }
            Ok(Some(cart)) => {
                tracing::debug!("Restored cart with {} line items", cart.len());
                cart
            }
            Err(e) if strict => return Err(e),
            Err(e) => {
                tracing::warn!("⚠️ Saved cart under '{}' is malformed, starting empty: {}", key, e);
                Cart::new()
            }
        };

        Ok(Self {
            inventory,
            storage,
            key,
            cart: Mutex::new(cart),
        })
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current cart. Never writes to storage.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    pub async fn add_product(&self, product_id: ProductId) -> Result<()> {
        let mut cart = self.cart.lock().await;

        let requested = cart.amount_of(product_id).saturating_add(1);
        let stock = self.inventory.stock(product_id).await?;

        if requested > stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: u64::from(requested),
                available: stock.amount,
            });
        }

        let mut updated = cart.clone();
        if !updated.set_amount(product_id, requested) {
            let product = self.inventory.product(product_id).await?;
            if product.id != product_id {
                tracing::warn!(
                    "Inventory returned product {} when asked for {}",
                    product.id,
                    product_id
                );
            }
            updated.push(CartLineItem {
                id: product_id,
                ..CartLineItem::from_product(product, 1)
            });
        }

        self.commit(&mut cart, updated).await?;
        tracing::info!("🛒 Product {} in cart, amount {}", product_id, requested);
        Ok(())
    }

    pub async fn remove_product(&self, product_id: ProductId) -> Result<()> {
        let mut cart = self.cart.lock().await;

        let mut updated = cart.clone();
        if updated.remove(product_id).is_none() {
            return Err(CartError::ProductNotInCart { product_id });
        }

        self.commit(&mut cart, updated).await?;
        tracing::info!("🗑️ Product {} removed from cart", product_id);
        Ok(())
    }

    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> Result<()> {
        let UpdateProductAmount { product_id, amount } = request;
        if amount <= 0 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }

        let mut cart = self.cart.lock().await;

        let stock = self.inventory.stock(product_id).await?;
        let requested = amount as u64;
        if requested > u64::from(stock.amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        // Bounded by the stock amount, so it fits.
        let amount = requested as u32;
        let mut updated = cart.clone();
        if !updated.set_amount(product_id, amount) {
            return Err(CartError::ProductNotInCart { product_id });
        }

        self.commit(&mut cart, updated).await?;
        tracing::info!("🔢 Product {} amount set to {}", product_id, amount);
        Ok(())
    }

    /// Persists `updated` and only then replaces the in-memory cart.
    async fn commit(&self, current: &mut Cart, updated: Cart) -> Result<()> {
        if *current == updated {
            tracing::debug!("Cart unchanged, skipping write");
            return Ok(());
        }

        let serialized = serde_json::to_string(&updated)?;
        self.storage.write(&self.key, &serialized).await?;
        tracing::debug!("Saved cart ({} bytes) under '{}'", serialized.len(), self.key);

        *current = updated;
        Ok(())
    }
}
