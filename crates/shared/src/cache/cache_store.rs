use crate::abstract_trait::CacheStoreTrait;
use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{
    Pool,
    redis::{Cmd, FromRedisValue, cmd},
};
use tracing::{debug, error};

/// Redis-backed [`CacheStoreTrait`]. Pool and command errors are logged here
/// and surface to callers as a miss.
#[derive(Clone)]
pub struct CacheStore {
    pool: Pool,
}

impl CacheStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn run<T: FromRedisValue + Send>(&self, command: &Cmd, key: &str) -> Option<T> {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("❌ Cache unavailable, no pooled Redis connection: {e}");
                return None;
            }
        };

        match command.query_async::<T>(&mut conn).await {
            Ok(value) => Some(value),
            Err(e) => {
                error!("❌ Cache command failed for key '{key}': {e}");
                None
            }
        }
    }
}

#[async_trait]
impl CacheStoreTrait for CacheStore {
    async fn get_raw(&self, key: &str) -> Option<String> {
        let value = self
            .run::<Option<String>>(cmd("GET").arg(key), key)
            .await
            .flatten();

        if value.is_none() {
            debug!("Cache miss for key: {key}");
        }

        value
    }

    async fn set_raw(&self, key: &str, value: &str, expiration: Duration) {
        let ttl = expiration.num_seconds().max(1);

        if self
            .run::<()>(cmd("SET").arg(key).arg(value).arg("EX").arg(ttl), key)
            .await
            .is_some()
        {
            debug!("Cached key '{key}' for {ttl}s");
        }
    }

    async fn delete(&self, key: &str) {
        self.run::<()>(cmd("DEL").arg(key), key).await;
    }
}
