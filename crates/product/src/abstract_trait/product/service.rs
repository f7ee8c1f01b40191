use crate::domain::response::product::{ProductListResponse, SingleProductResponse};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

/// Read-through cached catalog reads.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn get_products(&self) -> Result<ProductListResponse, ServiceError>;
    async fn get_product(&self, id: i32) -> Result<SingleProductResponse, ServiceError>;
}
