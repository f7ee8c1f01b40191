use crate::{
    abstract_trait::{
        cart::{DynCartService, DynCartStore},
        catalog::DynCatalogClient,
        order::{DynCheckoutService, DynOrderCommandRepository},
    },
    client::CatalogHttpClient,
    config::myconfig::Config,
    repository::{OrderCommandRepository, RedisCartStore},
    service::{CartService, CartServiceDeps, CheckoutService, CheckoutServiceDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::{ConnectionPool, RedisClient};
use std::{fmt, sync::Arc, time::Duration};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub cart_service: DynCartService,
    pub checkout_service: DynCheckoutService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("cart_service", &"CartService")
            .field("checkout_service", &"CheckoutService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub redis: RedisClient,
    pub config: Config,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            redis,
            config,
            registry,
        } = deps;

        let store: DynCartStore = Arc::new(RedisCartStore::new(
            redis.pool.clone(),
            config.cart_ttl_seconds,
        ));

        let catalog: DynCatalogClient = Arc::new(
            CatalogHttpClient::new(
                config.main_service_uri.clone(),
                Duration::from_secs(config.catalog_timeout_secs),
            )
            .context("Failed to initialize catalog client")?,
        );

        let orders: DynOrderCommandRepository = Arc::new(OrderCommandRepository::new(pool));

        let cart_service: DynCartService = Arc::new(
            CartService::new(CartServiceDeps {
                store,
                catalog,
                registry: registry.clone(),
            })
            .await,
        );

        let checkout_service: DynCheckoutService = Arc::new(
            CheckoutService::new(CheckoutServiceDeps {
                cart: cart_service.clone(),
                orders,
                default_currency: config.default_currency.clone(),
                registry,
            })
            .await,
        );

        Ok(Self {
            cart_service,
            checkout_service,
        })
    }
}
