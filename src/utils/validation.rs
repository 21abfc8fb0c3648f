use crate::utils::error::{CartError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CartError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub const MAX_STORAGE_KEY_LEN: usize = 128;

/// Cart keys become file names, so every key needs at least one ASCII
/// alphanumeric character to stay distinguishable after sanitizing.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    let reason = if key.trim().is_empty() {
        Some("Storage key cannot be empty or whitespace-only".to_string())
    } else if key.trim() != key {
        Some("Storage key cannot start or end with whitespace".to_string())
    } else if key.chars().any(char::is_control) {
        Some("Storage key contains control characters".to_string())
    } else if key.chars().count() > MAX_STORAGE_KEY_LEN {
        Some(format!(
            "Storage key is longer than {} characters",
            MAX_STORAGE_KEY_LEN
        ))
    } else if !key.chars().any(|c| c.is_ascii_alphanumeric()) {
        Some("Storage key needs at least one ASCII letter or digit".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
