use crate::{
    abstract_trait::product::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::response::product::{ProductListResponse, ProductResponse, SingleProductResponse},
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{CacheStoreExt, DynCacheStore},
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub const PRODUCTS_CACHE_KEY: &str = "cache:products";

pub fn product_cache_key(id: i32) -> String {
    format!("cache:product:{id}")
}

#[derive(Clone)]
pub struct ProductQueryService {
    repository: DynProductQueryRepository,
    cache: DynCacheStore,
    cache_ttl: Duration,
    tracer: OperationTracer,
}

pub struct ProductQueryServiceDeps {
    pub repository: DynProductQueryRepository,
    pub cache: DynCacheStore,
    pub cache_ttl: Duration,
    pub registry: Arc<Mutex<Registry>>,
}

impl ProductQueryService {
    pub async fn new(deps: ProductQueryServiceDeps) -> Self {
        let ProductQueryServiceDeps {
            repository,
            cache,
            cache_ttl,
            registry,
        } = deps;

        let tracer =
            OperationTracer::new("product-query-service", "product_query_service", &registry)
                .await;

        Self {
            repository,
            cache,
            cache_ttl,
            tracer,
        }
    }

    async fn load_products(&self) -> Result<ProductListResponse, ServiceError> {
        // An empty cached list is treated as a miss so a freshly seeded menu shows up.
        if let Some(products) = self
            .cache
            .get_from_cache::<Vec<ProductResponse>>(PRODUCTS_CACHE_KEY)
            .await
            .filter(|products| !products.is_empty())
        {
            info!("✅ Returning {} products from cache", products.len());
            return Ok(ProductListResponse {
                count: products.len(),
                products,
                cached: true,
            });
        }

        let products: Vec<ProductResponse> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(ProductResponse::from)
            .collect();

        self.cache
            .set_to_cache(PRODUCTS_CACHE_KEY, &products, self.cache_ttl)
            .await;

        Ok(ProductListResponse {
            count: products.len(),
            products,
            cached: false,
        })
    }

    async fn load_product(&self, id: i32) -> Result<SingleProductResponse, ServiceError> {
        let cache_key = product_cache_key(id);

        if let Some(product) = self
            .cache
            .get_from_cache::<ProductResponse>(&cache_key)
            .await
        {
            info!("✅ Returning product {id} from cache");
            return Ok(SingleProductResponse {
                product,
                cached: true,
            });
        }

        let product = self
            .repository
            .find_by_id(id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| ServiceError::NotFound("Product not found".into()))?;

        self.cache
            .set_to_cache(&cache_key, &product, self.cache_ttl)
            .await;

        Ok(SingleProductResponse {
            product,
            cached: false,
        })
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn get_products(&self) -> Result<ProductListResponse, ServiceError> {
        info!("🔍 Getting all products");

        let tracing_ctx = self.tracer.start(
            "get_products",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "get_products"),
            ],
        );

        let result = self.load_products().await;

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Products retrieved");

        result
    }

    async fn get_product(&self, id: i32) -> Result<SingleProductResponse, ServiceError> {
        info!("🔍 Getting product {id}");

        let tracing_ctx = self.tracer.start(
            "get_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "get_product"),
                KeyValue::new("product.id", i64::from(id)),
            ],
        );

        let result = self.load_product(id).await;

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Product retrieved");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::product::MockProductQueryRepositoryTrait,
        fakes::{InMemoryCacheStore, menu_position, registry},
    };
    use shared::errors::RepositoryError;

    async fn service(
        repository: MockProductQueryRepositoryTrait,
        cache: Arc<InMemoryCacheStore>,
    ) -> ProductQueryService {
        ProductQueryService::new(ProductQueryServiceDeps {
            repository: Arc::new(repository),
            cache,
            cache_ttl: Duration::seconds(21_600),
            registry: registry(),
        })
        .await
    }

    #[tokio::test]
    async fn products_are_read_through_the_cache() {
        let mut repository = MockProductQueryRepositoryTrait::new();
        repository
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![menu_position(1, "Margherita"), menu_position(2, "Cola")]));

        let cache = InMemoryCacheStore::new();
        let service = service(repository, cache.clone()).await;

        let first = service.get_products().await.unwrap();
        assert!(!first.cached);
        assert_eq!(first.count, 2);

        let second = service.get_products().await.unwrap();
        assert!(second.cached);
        assert_eq!(second.count, 2);
        assert_eq!(second.products, first.products);

        assert_eq!(cache.ttl_of(PRODUCTS_CACHE_KEY), Some(Duration::seconds(21_600)));
    }

    #[tokio::test]
    async fn empty_cached_list_falls_back_to_database() {
        let mut repository = MockProductQueryRepositoryTrait::new();
        repository
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![menu_position(7, "Pizza")]));

        let cache = InMemoryCacheStore::new();
        cache.seed(PRODUCTS_CACHE_KEY, "[]");
        let service = service(repository, cache).await;

        let response = service.get_products().await.unwrap();
        assert!(!response.cached);
        assert_eq!(response.count, 1);
    }

    #[tokio::test]
    async fn unavailable_cache_still_serves_from_database() {
        let mut repository = MockProductQueryRepositoryTrait::new();
        repository
            .expect_find_all()
            .times(2)
            .returning(|| Ok(vec![menu_position(1, "Margherita")]));

        let cache = InMemoryCacheStore::new();
        cache.go_offline();
        let service = service(repository, cache).await;

        assert!(!service.get_products().await.unwrap().cached);
        assert!(!service.get_products().await.unwrap().cached);
    }

    #[tokio::test]
    async fn single_product_is_cached_under_its_own_key() {
        let mut repository = MockProductQueryRepositoryTrait::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|id| Ok(Some(menu_position(id, "Pepperoni"))));

        let cache = InMemoryCacheStore::new();
        let service = service(repository, cache.clone()).await;

        let first = service.get_product(42).await.unwrap();
        assert!(!first.cached);
        assert_eq!(first.product.name, "Pepperoni");
        assert!(cache.contains("cache:product:42"));

        let second = service.get_product(42).await.unwrap();
        assert!(second.cached);
        assert_eq!(second.product, first.product);
    }

    #[tokio::test]
    async fn missing_product_is_not_found_and_not_cached() {
        let mut repository = MockProductQueryRepositoryTrait::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let cache = InMemoryCacheStore::new();
        let service = service(repository, cache.clone()).await;

        let err = service.get_product(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref msg) if msg == "Product not found"));
        assert!(!cache.contains("cache:product:404"));
    }

    #[tokio::test]
    async fn database_failure_is_propagated() {
        let mut repository = MockProductQueryRepositoryTrait::new();
        repository
            .expect_find_all()
            .returning(|| Err(RepositoryError::Custom("connection reset".into())));

        let service = service(repository, InMemoryCacheStore::new()).await;

        let err = service.get_products().await.unwrap_err();
        assert!(matches!(err, ServiceError::Repo(_)));
    }
}
