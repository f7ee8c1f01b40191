use crate::{
    abstract_trait::cart::CartStoreTrait,
    domain::cart::{CartId, CartLine, StoredLine},
};
use async_trait::async_trait;
use deadpool_redis::{Connection, Pool, redis};
use shared::errors::RepositoryError;
use std::collections::HashMap;
use tracing::{debug, error};

// KEYS[1] cart key, ARGV[1] field, ARGV[2] expected raw value ('' = absent),
// ARGV[3] replacement ('' = delete)
const SWAP_LINE_SCRIPT: &str = r#"
local current = redis.call('HGET', KEYS[1], ARGV[1])
if (current or '') ~= ARGV[2] then
    return 0
end
if ARGV[3] == '' then
    redis.call('HDEL', KEYS[1], ARGV[1])
else
    redis.call('HSET', KEYS[1], ARGV[1], ARGV[3])
end
return 1
"#;

pub struct RedisCartStore {
    pool: Pool,
    ttl_seconds: u64,
    swap_script: redis::Script,
}

impl RedisCartStore {
    pub fn new(pool: Pool, ttl_seconds: u64) -> Self {
        Self {
            pool,
            ttl_seconds,
            swap_script: redis::Script::new(SWAP_LINE_SCRIPT),
        }
    }

    async fn conn(&self) -> Result<Connection, RepositoryError> {
        self.pool.get().await.map_err(|e| {
            error!("❌ Failed to get Redis connection for cart store: {e:?}");
            RepositoryError::from(e)
        })
    }
}

fn encode(line: &CartLine) -> Result<String, RepositoryError> {
    serde_json::to_string(line).map_err(RepositoryError::from)
}

fn put_line_cmd(cart: &CartId, line: &CartLine) -> Result<redis::Cmd, RepositoryError> {
    let mut cmd = redis::cmd("HSET");
    cmd.arg(cart.redis_key()).arg(line.product_id).arg(encode(line)?);
    Ok(cmd)
}

/// Script arguments for a conditional write: the expected raw value and the
/// replacement, each `""` when absent.
fn swap_args(
    expected: Option<&StoredLine>,
    replacement: Option<&CartLine>,
) -> Result<(String, String), RepositoryError> {
    let expected_raw = expected.map(|stored| stored.raw.clone()).unwrap_or_default();
    let replacement_raw = replacement.map(encode).transpose()?.unwrap_or_default();
    Ok((expected_raw, replacement_raw))
}

fn decode(raw: String) -> Result<StoredLine, RepositoryError> {
    let line = serde_json::from_str::<CartLine>(&raw).map_err(|e| {
        error!("❌ Corrupt cart line in Redis: {e}");
        RepositoryError::from(e)
    })?;

    Ok(StoredLine { line, raw })
}

#[async_trait]
impl CartStoreTrait for RedisCartStore {
    async fn get_line(
        &self,
        cart: &CartId,
        product_id: i32,
    ) -> Result<Option<StoredLine>, RepositoryError> {
        let mut conn = self.conn().await?;

        let raw: Option<String> = redis::cmd("HGET")
            .arg(cart.redis_key())
            .arg(product_id)
            .query_async(&mut conn)
            .await?;

        raw.map(decode).transpose()
    }

    async fn put_line(&self, cart: &CartId, line: &CartLine) -> Result<(), RepositoryError> {
        let cmd = put_line_cmd(cart, line)?;
        let mut conn = self.conn().await?;

        cmd.query_async::<()>(&mut conn).await?;

        Ok(())
    }

    async fn swap_line(
        &self,
        cart: &CartId,
        product_id: i32,
        expected: Option<&StoredLine>,
        replacement: Option<&CartLine>,
    ) -> Result<bool, RepositoryError> {
        let (expected_raw, replacement_raw) = swap_args(expected, replacement)?;

        let mut conn = self.conn().await?;

        let swapped: i64 = self
            .swap_script
            .key(cart.redis_key())
            .arg(product_id)
            .arg(expected_raw)
            .arg(replacement_raw)
            .invoke_async(&mut conn)
            .await?;

        if swapped == 0 {
            debug!("🔄 Cart line {product_id} in cart {cart} changed underneath us");
        }

        Ok(swapped == 1)
    }

    async fn delete_line(&self, cart: &CartId, product_id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.conn().await?;

        let removed: i64 = redis::cmd("HDEL")
            .arg(cart.redis_key())
            .arg(product_id)
            .query_async(&mut conn)
            .await?;

        Ok(removed > 0)
    }

    async fn get_all_lines(&self, cart: &CartId) -> Result<Vec<CartLine>, RepositoryError> {
        let mut conn = self.conn().await?;

        let fields: HashMap<String, String> = redis::cmd("HGETALL")
            .arg(cart.redis_key())
            .query_async(&mut conn)
            .await?;

        fields
            .into_values()
            .map(|raw| decode(raw).map(|stored| stored.line))
            .collect()
    }

    async fn line_count(&self, cart: &CartId) -> Result<usize, RepositoryError> {
        let mut conn = self.conn().await?;

        let count: usize = redis::cmd("HLEN")
            .arg(cart.redis_key())
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }

    async fn clear(&self, cart: &CartId) -> Result<(), RepositoryError> {
        let mut conn = self.conn().await?;

        redis::cmd("DEL")
            .arg(cart.redis_key())
            .query_async::<()>(&mut conn)
            .await?;

        Ok(())
    }

    async fn refresh_ttl(&self, cart: &CartId) -> Result<(), RepositoryError> {
        let mut conn = self.conn().await?;

        redis::cmd("EXPIRE")
            .arg(cart.redis_key())
            .arg(self.ttl_seconds)
            .query_async::<()>(&mut conn)
            .await?;

        Ok(())
    }
}
