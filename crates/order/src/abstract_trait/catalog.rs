use crate::domain::cart::CatalogProduct;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use opentelemetry::Context;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCatalogClient = Arc<dyn CatalogClientTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogClientTrait {
    /// `Ok(None)` when the catalog does not know the product.
    async fn find_product(
        &self,
        product_id: i32,
        cx: &Context,
    ) -> Result<Option<CatalogProduct>, ServiceError>;
}
