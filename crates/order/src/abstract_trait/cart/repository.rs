use crate::domain::cart::{CartId, CartLine, StoredLine};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartStore = Arc<dyn CartStoreTrait + Send + Sync>;

/// Hash-per-cart storage of cart lines keyed by product id, sharing one expiry.
#[async_trait]
pub trait CartStoreTrait {
    async fn get_line(
        &self,
        cart: &CartId,
        product_id: i32,
    ) -> Result<Option<StoredLine>, RepositoryError>;

    async fn put_line(&self, cart: &CartId, line: &CartLine) -> Result<(), RepositoryError>;

    /// Replaces (or deletes, when `replacement` is `None`) a line only if it
    /// still holds exactly `expected`. Returns `false` when another writer won.
    async fn swap_line(
        &self,
        cart: &CartId,
        product_id: i32,
        expected: Option<&StoredLine>,
        replacement: Option<&CartLine>,
    ) -> Result<bool, RepositoryError>;

    async fn delete_line(&self, cart: &CartId, product_id: i32) -> Result<bool, RepositoryError>;

    async fn get_all_lines(&self, cart: &CartId) -> Result<Vec<CartLine>, RepositoryError>;

    async fn line_count(&self, cart: &CartId) -> Result<usize, RepositoryError>;

    async fn clear(&self, cart: &CartId) -> Result<(), RepositoryError>;

    async fn refresh_ttl(&self, cart: &CartId) -> Result<(), RepositoryError>;
}
