pub mod cart;
pub mod context;

pub use crate::domain::model::{
    Cart, CartLineItem, Product, ProductId, Stock, UpdateProductAmount,
};
pub use crate::domain::ports::{ConfigProvider, InventoryService, NotificationSink, Storage};
pub use crate::utils::error::Result;
