use crate::{
    abstract_trait::{
        cart::{CartServiceTrait, DynCartStore},
        catalog::DynCatalogClient,
    },
    domain::cart::{
        AddOutcome, CartId, CartLine, CatalogProduct, DecrementOutcome, cart_total,
    },
};
use async_trait::async_trait;
use opentelemetry::{Context, KeyValue};
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Conditional-write retries before a contended line update gives up.
pub const MAX_SWAP_ATTEMPTS: usize = 8;

const NOT_IN_CART: &str = "Product not found in cart";

#[derive(Clone)]
pub struct CartService {
    store: DynCartStore,
    catalog: DynCatalogClient,
    tracer: OperationTracer,
}

pub struct CartServiceDeps {
    pub store: DynCartStore,
    pub catalog: DynCatalogClient,
    pub registry: Arc<Mutex<Registry>>,
}

impl CartService {
    pub async fn new(deps: CartServiceDeps) -> Self {
        let CartServiceDeps {
            store,
            catalog,
            registry,
        } = deps;

        let tracer = OperationTracer::new("cart-service", "cart_service", &registry).await;

        Self {
            store,
            catalog,
            tracer,
        }
    }

    fn attributes(operation: &str, cart: &CartId, product_id: Option<i32>) -> Vec<KeyValue> {
        let mut attributes = vec![
            KeyValue::new("component", "cart"),
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("cart.id", cart.to_string()),
        ];
        if let Some(product_id) = product_id {
            attributes.push(KeyValue::new("product.id", i64::from(product_id)));
        }
        attributes
    }

    /// Read-modify-write of a single line with optimistic concurrency.
    ///
    /// `apply` sees the current line (if any) and returns the replacement
    /// (`None` deletes) plus the value to hand back. It may run several times.
    async fn update_line<R, F>(
        &self,
        cart: &CartId,
        product_id: i32,
        mut apply: F,
    ) -> Result<R, ServiceError>
    where
        F: FnMut(Option<&CartLine>) -> Result<(Option<CartLine>, R), ServiceError> + Send,
        R: Send,
    {
        for attempt in 1..=MAX_SWAP_ATTEMPTS {
            let current = self.store.get_line(cart, product_id).await?;
            let (replacement, result) = apply(current.as_ref().map(|stored| &stored.line))?;

            if self
                .store
                .swap_line(cart, product_id, current.as_ref(), replacement.as_ref())
                .await?
            {
                return Ok(result);
            }

            debug!(
                "🔄 Retrying update of product {product_id} in cart {cart} (attempt {attempt}/{MAX_SWAP_ATTEMPTS})"
            );
        }

        Err(ServiceError::Internal(format!(
            "Cart line {product_id} kept changing concurrently, gave up after {MAX_SWAP_ATTEMPTS} attempts"
        )))
    }

    async fn refresh_ttl(&self, cart: &CartId) {
        if let Err(e) = self.store.refresh_ttl(cart).await {
            warn!("⚠️ Failed to refresh TTL of cart {cart}: {e}");
        }
    }

    // An emptied cart key is already gone; EXPIRE on it would be a no-op at best.
    async fn refresh_ttl_if_not_empty(&self, cart: &CartId) {
        match self.store.line_count(cart).await {
            Ok(0) => debug!("Cart {cart} is empty, skipping TTL refresh"),
            Ok(_) => self.refresh_ttl(cart).await,
            Err(e) => warn!("⚠️ Failed to count lines of cart {cart}: {e}"),
        }
    }

    async fn add_line(
        &self,
        cart: &CartId,
        product_id: i32,
        product: CatalogProduct,
    ) -> Result<AddOutcome, ServiceError> {
        let info = product.into_product_info()?;

        let outcome = self
            .update_line(cart, product_id, |current| match current {
                Some(line) => {
                    let mut next = line.clone();
                    next.quantity = next.quantity.checked_add(1).ok_or_else(|| {
                        ServiceError::Validation(vec!["Quantity limit reached".into()])
                    })?;
                    Ok((Some(next), AddOutcome::Incremented))
                }
                None => Ok((
                    Some(CartLine::new(product_id, info.clone())),
                    AddOutcome::Added,
                )),
            })
            .await?;

        self.refresh_ttl(cart).await;

        Ok(outcome)
    }

    async fn lookup_product(
        &self,
        product_id: i32,
        cx: &Context,
    ) -> Result<CatalogProduct, ServiceError> {
        self.catalog
            .find_product(product_id, cx)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product does not exist".into()))
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn add_from_catalog(
        &self,
        cart: &CartId,
        product_id: i32,
    ) -> Result<AddOutcome, ServiceError> {
        info!("🛒 Adding product {product_id} to cart {cart}");

        let tracing_ctx = self.tracer.start(
            "add_from_catalog",
            Self::attributes("add_from_catalog", cart, Some(product_id)),
        );

        let result = match self.lookup_product(product_id, &tracing_ctx.cx).await {
            Ok(product) => self.add_line(cart, product_id, product).await,
            Err(e) => Err(e),
        };

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Product added to cart");

        result
    }

    async fn add_or_increment(
        &self,
        cart: &CartId,
        product_id: i32,
        product: CatalogProduct,
    ) -> Result<AddOutcome, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "add_or_increment",
            Self::attributes("add_or_increment", cart, Some(product_id)),
        );

        let result = self.add_line(cart, product_id, product).await;

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Product added to cart");

        result
    }

    async fn decrement_or_remove(
        &self,
        cart: &CartId,
        product_id: i32,
    ) -> Result<DecrementOutcome, ServiceError> {
        info!("➖ Decrementing product {product_id} in cart {cart}");

        let tracing_ctx = self.tracer.start(
            "decrement_or_remove",
            Self::attributes("decrement_or_remove", cart, Some(product_id)),
        );

        let result = self
            .update_line(cart, product_id, |current| {
                let line = current.ok_or_else(|| ServiceError::NotFound(NOT_IN_CART.into()))?;

                if line.quantity > 1 {
                    let mut next = line.clone();
                    next.quantity -= 1;
                    Ok((Some(next), DecrementOutcome::Decremented))
                } else {
                    Ok((None, DecrementOutcome::Removed))
                }
            })
            .await;

        if result.is_ok() {
            self.refresh_ttl_if_not_empty(cart).await;
        }

        self.tracer.finish(
            &tracing_ctx,
            Method::Post,
            &result,
            "Product quantity decreased in cart",
        );

        result
    }

    async fn remove(&self, cart: &CartId, product_id: i32) -> Result<bool, ServiceError> {
        info!("🗑️ Removing product {product_id} from cart {cart}");

        let tracing_ctx = self.tracer.start(
            "remove",
            Self::attributes("remove", cart, Some(product_id)),
        );

        let result = self
            .store
            .delete_line(cart, product_id)
            .await
            .map_err(ServiceError::from);

        if result.is_ok() {
            self.refresh_ttl_if_not_empty(cart).await;
        }

        self.tracer
            .finish(&tracing_ctx, Method::Delete, &result, "Product removed from cart");

        result
    }

    async fn toggle_addition(
        &self,
        cart: &CartId,
        product_id: i32,
        addition_name: &str,
    ) -> Result<bool, ServiceError> {
        info!("🔄 Toggling addition \"{addition_name}\" of product {product_id} in cart {cart}");

        let mut attributes = Self::attributes("toggle_addition", cart, Some(product_id));
        attributes.push(KeyValue::new("addition.name", addition_name.to_string()));
        let tracing_ctx = self.tracer.start("toggle_addition", attributes);

        let result = self
            .update_line(cart, product_id, |current| {
                let line = current.ok_or_else(|| ServiceError::NotFound(NOT_IN_CART.into()))?;

                let mut next = line.clone();
                let selected = next
                    .product_info
                    .additions
                    .get_mut(addition_name)
                    .ok_or_else(|| {
                        ServiceError::InvalidAddition(format!(
                            "Addition \"{addition_name}\" not available for this product"
                        ))
                    })?;
                *selected = !*selected;
                let new_state = *selected;

                Ok((Some(next), new_state))
            })
            .await;

        if result.is_ok() {
            self.refresh_ttl(cart).await;
        }

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Addition toggled");

        result
    }

    async fn get_cart(&self, cart: &CartId) -> Result<Vec<CartLine>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("get_cart", Self::attributes("get_cart", cart, None));

        let result = self
            .store
            .get_all_lines(cart)
            .await
            .map(|mut lines| {
                lines.sort_by_key(|line| line.product_id);
                lines
            })
            .map_err(ServiceError::from);

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Cart retrieved");

        result
    }

    async fn get_total(&self, cart: &CartId) -> Result<Decimal, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("get_total", Self::attributes("get_total", cart, None));

        let result = self
            .store
            .get_all_lines(cart)
            .await
            .map_err(ServiceError::from)
            .and_then(|lines| cart_total(&lines));

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Cart total computed");

        result
    }

    async fn clear_cart(&self, cart: &CartId) -> Result<(), ServiceError> {
        info!("🧹 Clearing cart {cart}");

        let tracing_ctx = self
            .tracer
            .start("clear_cart", Self::attributes("clear_cart", cart, None));

        let result = self.store.clear(cart).await.map_err(ServiceError::from);

        self.tracer
            .finish(&tracing_ctx, Method::Delete, &result, "Cart cleared");

        result
    }
}
