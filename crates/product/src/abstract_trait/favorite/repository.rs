use crate::model::favorite::Favorite;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynFavoriteRepository = Arc<dyn FavoriteRepositoryTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FavoriteRepositoryTrait {
    /// Returns `false` when the product was already a favorite.
    async fn create_if_absent(
        &self,
        product_id: i32,
        product_info: &Value,
    ) -> Result<bool, RepositoryError>;

    /// Returns `false` when there was nothing to delete.
    async fn delete_by_product_id(&self, product_id: i32) -> Result<bool, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Favorite>, RepositoryError>;
}
