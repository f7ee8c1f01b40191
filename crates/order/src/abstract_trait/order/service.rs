use crate::domain::{cart::CartId, requests::order::CheckoutRequest, response::order::OrderResponse};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCheckoutService = Arc<dyn CheckoutServiceTrait + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CheckoutServiceTrait {
    async fn checkout(
        &self,
        cart: &CartId,
        req: &CheckoutRequest,
    ) -> Result<OrderResponse, ServiceError>;
}
