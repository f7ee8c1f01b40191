use crate::model::product::MenuPosition;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<MenuPosition>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<MenuPosition>, RepositoryError>;
}
