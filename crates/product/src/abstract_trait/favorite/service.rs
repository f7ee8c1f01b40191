use crate::domain::response::favorite::{FavoriteOutcome, FavoriteResponse};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynFavoriteService = Arc<dyn FavoriteServiceTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FavoriteServiceTrait {
    async fn add_favorite(&self, product_id: i32) -> Result<FavoriteOutcome, ServiceError>;
    async fn delete_favorite(&self, product_id: i32) -> Result<(), ServiceError>;
    async fn get_favorites(&self) -> Result<Vec<FavoriteResponse>, ServiceError>;
}
