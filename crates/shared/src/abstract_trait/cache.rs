use async_trait::async_trait;
use chrono::Duration;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::error;

pub type DynCacheStore = Arc<dyn CacheStoreTrait + Send + Sync>;

/// Best-effort string cache. Failures are logged by the implementation and
/// reported as a miss, never as an error.
#[async_trait]
pub trait CacheStoreTrait {
    async fn get_raw(&self, key: &str) -> Option<String>;
    async fn set_raw(&self, key: &str, value: &str, expiration: Duration);
    async fn delete(&self, key: &str);
}

#[async_trait]
pub trait CacheStoreExt {
    async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Send;

    async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize + Sync;
}

#[async_trait]
impl<C> CacheStoreExt for C
where
    C: CacheStoreTrait + Send + Sync + ?Sized,
{
    async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        let data = self.get_raw(key).await?;

        match serde_json::from_str::<T>(&data) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                error!(
                    "Failed to deserialize cached value for key '{}': {:?}",
                    key, e
                );
                None
            }
        }
    }

    async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize + Sync,
    {
        match serde_json::to_string(data) {
            Ok(json) => self.set_raw(key, &json, expiration).await,
            Err(e) => error!("Failed to serialize data for key '{}': {:?}", key, e),
        }
    }
}
