use crate::{
    abstract_trait::{
        cart::DynCartService,
        order::{CheckoutServiceTrait, DynOrderCommandRepository},
    },
    domain::{
        cart::{CartId, CartLine, cart_total, money_to_f64, round_money},
        requests::order::CheckoutRequest,
        response::order::OrderResponse,
    },
    model::order::{NewOrder, OrderPosition},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::Value;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const MAX_CURRENCY_LEN: usize = 32;

#[derive(Clone)]
pub struct CheckoutService {
    cart: DynCartService,
    orders: DynOrderCommandRepository,
    default_currency: String,
    tracer: OperationTracer,
}

pub struct CheckoutServiceDeps {
    pub cart: DynCartService,
    pub orders: DynOrderCommandRepository,
    pub default_currency: String,
    pub registry: Arc<Mutex<Registry>>,
}

// Mirrors JSON truthiness: null, false, 0, "", [] and {} are all "no address".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn validate_address(address: Option<&Value>) -> Result<Value, ServiceError> {
    match address {
        None => Err(ServiceError::MissingAddress),
        Some(value) if is_blank(value) => Err(ServiceError::MissingAddress),
        Some(value @ Value::Object(_)) => Ok(value.clone()),
        Some(_) => Err(ServiceError::InvalidAddress),
    }
}

fn to_position(line: &CartLine) -> Result<OrderPosition, ServiceError> {
    let info = &line.product_info;

    Ok(OrderPosition {
        product_id: line.product_id,
        name: info.name.clone(),
        kind: info.kind.clone(),
        price: money_to_f64(info.cost),
        quantity: line.quantity,
        total: money_to_f64(round_money(line.subtotal()?)),
        additions: line.active_additions(),
        preview_link: info.preview_link.clone(),
        description: info.description.clone(),
    })
}

impl CheckoutService {
    pub async fn new(deps: CheckoutServiceDeps) -> Self {
        let CheckoutServiceDeps {
            cart,
            orders,
            default_currency,
            registry,
        } = deps;

        let tracer = OperationTracer::new("checkout-service", "checkout_service", &registry).await;

        Self {
            cart,
            orders,
            default_currency,
            tracer,
        }
    }

    fn resolve_currency(&self, requested: Option<&str>) -> Result<String, ServiceError> {
        match requested.map(str::trim) {
            None | Some("") => Ok(self.default_currency.clone()),
            Some(currency) if currency.chars().count() > MAX_CURRENCY_LEN => {
                Err(ServiceError::Validation(vec![format!(
                    "payment_currency must be at most {MAX_CURRENCY_LEN} characters"
                )]))
            }
            Some(currency) => Ok(currency.to_string()),
        }
    }

    async fn place_order(
        &self,
        cart: &CartId,
        req: &CheckoutRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let lines = self.cart.get_cart(cart).await?;
        if lines.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let address = validate_address(req.address.as_ref())?;
        let payment_currency = self.resolve_currency(req.payment_currency.as_deref())?;

        let new_order = NewOrder {
            order_time: Utc::now().naive_utc(),
            payment_sum: cart_total(&lines)?,
            payment_currency,
            positions: lines.iter().map(to_position).collect::<Result<_, _>>()?,
            address,
            paid: true,
        };

        let order = self.orders.create_order(&new_order).await.map_err(|e| {
            error!("❌ Failed to persist order for cart {cart}: {e}");
            ServiceError::OrderPersistence(e.to_string())
        })?;

        // The order is committed at this point; a stale cart is the lesser evil.
        if let Err(e) = self.cart.clear_cart(cart).await {
            error!(
                "❌ Order {} saved but cart {cart} could not be cleared: {e}",
                order.id
            );
        }

        info!(
            "✅ Order {} placed from cart {cart}: {} {}",
            order.id, order.payment_sum, order.payment_currency
        );

        Ok(OrderResponse::from(order))
    }
}

#[async_trait]
impl CheckoutServiceTrait for CheckoutService {
    async fn checkout(
        &self,
        cart: &CartId,
        req: &CheckoutRequest,
    ) -> Result<OrderResponse, ServiceError> {
        info!("🧾 Checking out cart {cart}");

        let tracing_ctx = self.tracer.start(
            "checkout",
            vec![
                KeyValue::new("component", "checkout"),
                KeyValue::new("operation", "checkout"),
                KeyValue::new("cart.id", cart.to_string()),
            ],
        );

        let result = self.place_order(cart, req).await;

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Order created successfully");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            cart::CartServiceTrait, catalog::MockCatalogClientTrait,
            order::MockOrderCommandRepositoryTrait,
        },
        fakes::{InMemoryCartStore, catalog_product, registry},
        model::order::UserOrder,
        service::{CartService, CartServiceDeps},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;
    use shared::errors::RepositoryError;
    use sqlx::types::Json;
    use std::str::FromStr;

    fn persisted(id: i32, req: &NewOrder) -> UserOrder {
        UserOrder {
            id,
            order_time: req.order_time,
            payment_sum: req.payment_sum,
            payment_currency: req.payment_currency.clone(),
            positions: Json(req.positions.clone()),
            address: Json(req.address.clone()),
            paid: req.paid,
        }
    }

    async fn cart_service(store: Arc<InMemoryCartStore>) -> Arc<CartService> {
        Arc::new(
            CartService::new(CartServiceDeps {
                store,
                catalog: Arc::new(MockCatalogClientTrait::new()),
                registry: registry(),
            })
            .await,
        )
    }

    async fn checkout_service(
        cart: Arc<CartService>,
        orders: MockOrderCommandRepositoryTrait,
    ) -> CheckoutService {
        CheckoutService::new(CheckoutServiceDeps {
            cart,
            orders: Arc::new(orders),
            default_currency: "LTC".into(),
            registry: registry(),
        })
        .await
    }

    fn with_address() -> CheckoutRequest {
        CheckoutRequest {
            address: Some(json!({"street": "Main st. 1", "flat": 4})),
            payment_currency: None,
        }
    }

    #[tokio::test]
    async fn empty_cart_creates_no_order() {
        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders.expect_create_order().never();

        let service = checkout_service(cart_service(InMemoryCartStore::new()).await, orders).await;

        let err = service
            .checkout(&CartId::default(), &with_address())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::EmptyCart));
    }

    #[tokio::test]
    async fn empty_cart_is_reported_before_missing_address() {
        let service = checkout_service(
            cart_service(InMemoryCartStore::new()).await,
            MockOrderCommandRepositoryTrait::new(),
        )
        .await;

        let err = service
            .checkout(&CartId::default(), &CheckoutRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::EmptyCart));
    }

    #[tokio::test]
    async fn address_must_be_a_non_empty_object() {
        let store = InMemoryCartStore::new();
        let cart_service = cart_service(store.clone()).await;
        let cart = CartId::default();
        cart_service
            .add_or_increment(&cart, 1, catalog_product(1, 1.0, &[]))
            .await
            .unwrap();

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders.expect_create_order().never();
        let service = checkout_service(cart_service, orders).await;

        for missing in [None, Some(json!(null)), Some(json!({})), Some(json!("")), Some(json!(0)), Some(json!(false))] {
            let req = CheckoutRequest {
                address: missing,
                payment_currency: None,
            };
            let err = service.checkout(&cart, &req).await.unwrap_err();
            assert!(matches!(err, ServiceError::MissingAddress));
        }

        for invalid in [json!("Main st. 1"), json!([1, 2]), json!(7)] {
            let req = CheckoutRequest {
                address: Some(invalid),
                payment_currency: None,
            };
            let err = service.checkout(&cart, &req).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidAddress));
        }

        assert!(store.exists(&cart));
    }

    #[tokio::test]
    async fn overlong_currency_is_rejected() {
        let cart_service = cart_service(InMemoryCartStore::new()).await;
        let cart = CartId::default();
        cart_service
            .add_or_increment(&cart, 1, catalog_product(1, 1.0, &[]))
            .await
            .unwrap();

        let service = checkout_service(cart_service, MockOrderCommandRepositoryTrait::new()).await;
        let req = CheckoutRequest {
            payment_currency: Some("X".repeat(33)),
            ..with_address()
        };

        let err = service.checkout(&cart, &req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn valid_checkout_persists_one_order_and_empties_cart() {
        let store = InMemoryCartStore::new();
        let cart_service = cart_service(store.clone()).await;
        let cart = CartId::default();

        for _ in 0..2 {
            cart_service
                .add_or_increment(&cart, 1, catalog_product(1, 9.99, &["A", "B"]))
                .await
                .unwrap();
        }
        for _ in 0..3 {
            cart_service
                .add_or_increment(&cart, 2, catalog_product(2, 5.5, &[]))
                .await
                .unwrap();
        }
        cart_service.toggle_addition(&cart, 1, "B").await.unwrap();

        let total_before = cart_service.get_total(&cart).await.unwrap();

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders
            .expect_create_order()
            .times(1)
            .withf(|req| {
                req.paid
                    && req.payment_currency == "LTC"
                    && req.payment_sum == Decimal::from_str("36.48").unwrap()
                    && req.address["street"] == "Main st. 1"
            })
            .returning(|req| Ok(persisted(17, req)));

        let service = checkout_service(cart_service.clone(), orders).await;

        let order = service.checkout(&cart, &with_address()).await.unwrap();

        assert_eq!(order.order_id, 17);
        assert_eq!(Decimal::from_str("36.48").unwrap(), total_before);
        assert_eq!(order.payment_sum, 36.48);
        assert!(order.paid);
        assert_eq!(order.positions_count, 2);

        let first = &order.positions[0];
        assert_eq!(first.product_id, 1);
        assert_eq!(first.quantity, 2);
        assert_eq!(first.price, 9.99);
        assert_eq!(first.total, 19.98);
        assert_eq!(first.additions, vec!["B".to_string()]);
        assert!(order.positions[1].additions.is_empty());

        assert!(cart_service.get_cart(&cart).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn scenario_two_pizzas() {
        let cart_service = cart_service(InMemoryCartStore::new()).await;
        let cart = CartId::default();

        cart_service
            .add_or_increment(&cart, 42, catalog_product(42, 12.5, &[]))
            .await
            .unwrap();
        cart_service
            .add_or_increment(&cart, 42, catalog_product(42, 12.5, &[]))
            .await
            .unwrap();
        assert_eq!(cart_service.get_total(&cart).await.unwrap(), Decimal::from(25));

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders
            .expect_create_order()
            .returning(|req| Ok(persisted(1, req)));
        let service = checkout_service(cart_service.clone(), orders).await;

        let req = CheckoutRequest {
            payment_currency: Some("USD".into()),
            ..with_address()
        };
        let order = service.checkout(&cart, &req).await.unwrap();

        assert_eq!(order.payment_sum, 25.0);
        assert_eq!(order.payment_currency, "USD");
        assert_eq!(order.positions[0].quantity, 2);
        assert!(cart_service.get_cart(&cart).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persistence_failure_leaves_cart_intact() {
        let store = InMemoryCartStore::new();
        let cart_service = cart_service(store.clone()).await;
        let cart = CartId::default();
        cart_service
            .add_or_increment(&cart, 1, catalog_product(1, 4.0, &[]))
            .await
            .unwrap();

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders
            .expect_create_order()
            .returning(|_| Err(RepositoryError::Custom("connection reset".into())));
        let service = checkout_service(cart_service.clone(), orders).await;

        let err = service.checkout(&cart, &with_address()).await.unwrap_err();

        assert!(matches!(err, ServiceError::OrderPersistence(_)));
        assert_eq!(cart_service.get_cart(&cart).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_failure_after_commit_still_returns_order() {
        let store = InMemoryCartStore::new();
        let cart_service = cart_service(store.clone()).await;
        let cart = CartId::default();
        cart_service
            .add_or_increment(&cart, 1, catalog_product(1, 4.0, &[]))
            .await
            .unwrap();
        store.fail_clear();

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders
            .expect_create_order()
            .times(1)
            .returning(|req| {
                let mut order = persisted(3, req);
                order.order_time = NaiveDate::from_ymd_opt(2025, 1, 1)
                    .and_then(|d| d.and_hms_opt(12, 0, 0))
                    .unwrap();
                Ok(order)
            });
        let service = checkout_service(cart_service, orders).await;

        let order = service.checkout(&cart, &with_address()).await.unwrap();

        assert_eq!(order.order_id, 3);
        assert_eq!(order.order_time.to_string(), "2025-01-01 12:00:00");
        assert!(store.exists(&cart));
    }

    #[tokio::test]
    async fn overflowing_amount_fails_without_persisting() {
        let store = InMemoryCartStore::new();
        let cart = CartId::default();
        store.seed_raw(
            &cart,
            9,
            &format!(
                r#"{{"product_id":9,"quantity":2,"product_info":{{"name":"Gold","cost":"{}","type":"pizza"}}}}"#,
                Decimal::MAX
            ),
        );

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders.expect_create_order().never();
        let service = checkout_service(cart_service(store.clone()).await, orders).await;

        let err = service.checkout(&cart, &with_address()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Internal(_)));
        assert!(store.exists(&cart));
    }
}
