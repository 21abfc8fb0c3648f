pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::CartCommand, CliConfig};

pub use adapters::{
    inventory::HttpInventory,
    notifier::{BufferedNotifier, ConsoleNotifier, TracingNotifier},
    storage::{LocalStorage, MemoryStorage},
};
pub use config::toml_config::CartConfig;
pub use core::{cart::CartStore, context::CartContext};
pub use domain::model::{Cart, CartLineItem, Product, ProductId, Stock, UpdateProductAmount};
pub use utils::error::{CartError, Result};
