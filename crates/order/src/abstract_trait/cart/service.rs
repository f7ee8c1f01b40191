use crate::domain::cart::{AddOutcome, CartId, CartLine, CatalogProduct, DecrementOutcome};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use rust_decimal::Decimal;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CartServiceTrait {
    /// Looks the product up in the catalog and adds it.
    async fn add_from_catalog(
        &self,
        cart: &CartId,
        product_id: i32,
    ) -> Result<AddOutcome, ServiceError>;

    async fn add_or_increment(
        &self,
        cart: &CartId,
        product_id: i32,
        product: CatalogProduct,
    ) -> Result<AddOutcome, ServiceError>;

    async fn decrement_or_remove(
        &self,
        cart: &CartId,
        product_id: i32,
    ) -> Result<DecrementOutcome, ServiceError>;

    async fn remove(&self, cart: &CartId, product_id: i32) -> Result<bool, ServiceError>;

    async fn toggle_addition(
        &self,
        cart: &CartId,
        product_id: i32,
        addition_name: &str,
    ) -> Result<bool, ServiceError>;

    async fn get_cart(&self, cart: &CartId) -> Result<Vec<CartLine>, ServiceError>;

    async fn get_total(&self, cart: &CartId) -> Result<Decimal, ServiceError>;

    async fn clear_cart(&self, cart: &CartId) -> Result<(), ServiceError>;
}
