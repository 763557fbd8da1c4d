mod cache_store;
mod errors;
mod types;

pub(crate) use cache_store::GENERIC_CACHE_STORE;
pub use errors::StorageError;
pub(crate) use types::CacheData;

/// Verify the configured cache store is reachable. Called once at startup.
pub(crate) async fn init() -> Result<(), StorageError> {
    GENERIC_CACHE_STORE.lock().await.init().await
}
