use crate::model::order::{NewOrder, UserOrder};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

/// Orders are append-only: there is no update or delete.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(&self, req: &NewOrder) -> Result<UserOrder, RepositoryError>;
}
