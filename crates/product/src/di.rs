use crate::{
    abstract_trait::{
        favorite::{DynFavoriteRepository, DynFavoriteService},
        product::{DynProductQueryRepository, DynProductQueryService},
    },
    config::myconfig::Config,
    repository::{FavoriteRepository, ProductQueryRepository},
    service::{
        FavoriteService, FavoriteServiceDeps, ProductQueryService, ProductQueryServiceDeps,
    },
};
use anyhow::Result;
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynCacheStore,
    cache::CacheStore,
    config::{ConnectionPool, RedisClient},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_service: DynProductQueryService,
    pub favorite_service: DynFavoriteService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_service", &"ProductQueryService")
            .field("favorite_service", &"FavoriteService")
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

        let cache: DynCacheStore = Arc::new(CacheStore::new(redis.pool.clone()));

        let products: DynProductQueryRepository =
            Arc::new(ProductQueryRepository::new(pool.clone()));
        let favorites: DynFavoriteRepository = Arc::new(FavoriteRepository::new(pool));

        let product_service: DynProductQueryService = Arc::new(
            ProductQueryService::new(ProductQueryServiceDeps {
                repository: products.clone(),
                cache,
                cache_ttl: Duration::seconds(config.products_cache_ttl),
                registry: registry.clone(),
            })
            .await,
        );

        let favorite_service: DynFavoriteService = Arc::new(
            FavoriteService::new(FavoriteServiceDeps {
                favorites,
                products,
                registry,
            })
            .await,
        );

        Ok(Self {
            product_service,
            favorite_service,
        })
    }
}
