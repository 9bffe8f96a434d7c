use std::sync::Arc;

use super::config::StorageConfig;
use super::error::StorageResult;
use super::object_store::ObjectStoreProvider;
use super::provider::StorageProvider;

/// Factory for creating storage providers
pub struct StorageProviderFactory;

impl StorageProviderFactory {
    /// Create a storage provider from a configuration.
    ///
    /// The returned provider works with any object_store backend (AWS S3,
    /// Azure Blob Storage, GCS, local filesystem, in-memory).
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The storage configuration is invalid
    /// * Required configuration options are missing
    /// * The storage provider cannot be initialized
    pub async fn from_config(config: StorageConfig) -> StorageResult<Arc<dyn StorageProvider>> {
        let provider = ObjectStoreProvider::new(config).await?;
        Ok(Arc::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_memory() {
        let provider = StorageProviderFactory::from_config(StorageConfig::memory())
            .await
            .unwrap();
        assert_eq!(provider.base_path(), "memory://");
    }

    #[tokio::test]
    async fn test_from_config_invalid() {
        let config = StorageConfig::local().with_option("path", "/definitely/not/there");
        assert!(StorageProviderFactory::from_config(config).await.is_err());
    }
}
