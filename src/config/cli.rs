use crate::core::{ProductId, UpdateProductAmount};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum CartCommand {
    /// Print the cart with subtotals
    Show,

    /// Add one unit of a product
    Add { product_id: u64 },

    /// Remove a product from the cart
    Remove { product_id: u64 },

    /// Set the amount of a product already in the cart
    Update {
        product_id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl CartCommand {
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartCommand::Show => None,
            CartCommand::Add { product_id }
            | CartCommand::Remove { product_id }
            | CartCommand::Update { product_id, .. } => Some(ProductId::new(*product_id)),
        }
    }

    pub fn update_request(&self) -> Option<UpdateProductAmount> {
        match self {
            CartCommand::Update { product_id, amount } => Some(UpdateProductAmount {
                product_id: ProductId::new(*product_id),
                amount: *amount,
            }),
            _ => None,
        }
    }
}
