use crate::domain::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Requested quantity {requested} of product {product_id} exceeds stock of {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    #[error("Product {product_id} is not in the cart")]
    ProductNotInCart { product_id: ProductId },

    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Inventory service returned {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored value under '{key}' is unreadable: {reason}")]
    MalformedData { key: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Cart,
    Inventory,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::StockExceeded { .. }
            | CartError::ProductNotInCart { .. }
            | CartError::InvalidAmount { .. } => ErrorCategory::Cart,
            CartError::Api(_) | CartError::UpstreamStatus { .. } => ErrorCategory::Inventory,
            CartError::Io(_) | CartError::Serialization(_) | CartError::MalformedData { .. } => {
                ErrorCategory::Storage
            }
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Cart if self.is_silent() => ErrorSeverity::Low,
            ErrorCategory::Cart => ErrorSeverity::High,
            ErrorCategory::Inventory => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Outcomes that are ignored without telling the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, CartError::InvalidAmount { .. })
    }

    pub fn is_stock_exceeded(&self) -> bool {
        matches!(self, CartError::StockExceeded { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::StockExceeded { .. } => "Requested quantity is out of stock".to_string(),
            CartError::ProductNotInCart { product_id } => {
                format!("Product {} is not in the cart", product_id)
            }
            CartError::InvalidAmount { .. } => "Amount must be at least 1".to_string(),
            CartError::Api(_) | CartError::UpstreamStatus { .. } => {
                "Could not reach the inventory service".to_string()
            }
            CartError::Io(_) | CartError::Serialization(_) | CartError::MalformedData { .. } => {
                "Could not read or save the cart".to_string()
            }
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Cart => "Check the cart contents and the requested quantity",
            ErrorCategory::Inventory => {
                "Check that the inventory service is running and the base URL is correct"
            }
            ErrorCategory::Storage => {
                "Check permissions on the storage directory or remove the corrupted cart file"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_amount_is_the_only_silent_error() {
        let silent = CartError::InvalidAmount {
            product_id: ProductId::new(1),
            amount: 0,
        };
        let loud = CartError::ProductNotInCart {
            product_id: ProductId::new(1),
        };

        assert!(silent.is_silent());
        assert_eq!(silent.severity(), ErrorSeverity::Low);
        assert!(!loud.is_silent());
        assert_eq!(loud.severity(), ErrorSeverity::High);
    }

    #[test]
    fn upstream_status_is_an_inventory_error() {
        let err = CartError::UpstreamStatus {
            url: "http://localhost/stock/1".to_string(),
            status: 404,
        };
        assert_eq!(err.category(), ErrorCategory::Inventory);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn malformed_data_is_a_critical_storage_error() {
        let err = CartError::MalformedData {
            key: "@RocketShoes:cart".to_string(),
            reason: "invalid utf-8 sequence".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.user_friendly_message(), "Could not read or save the cart");
    }

    #[test]
    fn config_errors_share_one_category() {
        let errors = [
            CartError::ConfigError {
                message: "unreadable".to_string(),
            },
            CartError::ConfigValidationError {
                field: "storage.key".to_string(),
                message: "missing".to_string(),
            },
            CartError::InvalidConfigValueError {
                field: "storage.key".to_string(),
                value: " ".to_string(),
                reason: "blank".to_string(),
            },
        ];

        for err in &errors {
            assert_eq!(err.category(), ErrorCategory::Configuration);
            assert!(err.user_friendly_message().starts_with("Invalid configuration"));
        }
    }
}
