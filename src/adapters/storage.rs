use crate::core::Storage;
use crate::utils::error::{CartError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Directory-backed storage: each key lives in its own JSON file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// File that holds `key`, e.g. `@RocketShoes:cart` -> `_RocketShoes_cart.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", file_name))
    }
}

impl Storage for LocalStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let bytes = match fs::read(self.path_for(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| CartError::MalformedData {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(full_path, value).await?;
        Ok(())
    }
}

/// Process-local storage, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self, key: &str) -> Option<String> {
        self.slots.lock().await.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.snapshot(key).await)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().await;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_is_sanitized_into_file_name() {
        let storage = LocalStorage::new("/tmp/carts");
        assert_eq!(
            storage.path_for("@RocketShoes:cart"),
            PathBuf::from("/tmp/carts/_RocketShoes_cart.json")
        );
        assert_eq!(
            storage.path_for("../escape"),
            PathBuf::from("/tmp/carts/.._escape.json")
        );
    }

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert_eq!(storage.read("@RocketShoes:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").join("dir"));

        storage.write("@RocketShoes:cart", "[]").await.unwrap();
        storage.write("@RocketShoes:cart", "[1]").await.unwrap();

        assert_eq!(
            storage.read("@RocketShoes:cart").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn test_non_utf8_file_is_malformed_data() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        std::fs::write(storage.path_for("@RocketShoes:cart"), [0xff, 0xfe, b'[', b']']).unwrap();

        let err = storage.read("@RocketShoes:cart").await.unwrap_err();

        assert!(matches!(err, CartError::MalformedData { ref key, .. } if key == "@RocketShoes:cart"));
    }

    #[tokio::test]
    async fn test_memory_storage_is_shared_between_clones() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        clone.write("cart", "[]").await.unwrap();

        assert_eq!(storage.read("cart").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.snapshot("other").await, None);
    }
}
