use crate::{
    abstract_trait::{
        favorite::{DynFavoriteRepository, FavoriteServiceTrait},
        product::DynProductQueryRepository,
    },
    domain::response::{
        favorite::{FavoriteOutcome, FavoriteResponse},
        product::ProductResponse,
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct FavoriteService {
    favorites: DynFavoriteRepository,
    products: DynProductQueryRepository,
    tracer: OperationTracer,
}

pub struct FavoriteServiceDeps {
    pub favorites: DynFavoriteRepository,
    pub products: DynProductQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl FavoriteService {
    pub async fn new(deps: FavoriteServiceDeps) -> Self {
        let FavoriteServiceDeps {
            favorites,
            products,
            registry,
        } = deps;

        let tracer =
            OperationTracer::new("favorite-service", "favorite_service", &registry).await;

        Self {
            favorites,
            products,
            tracer,
        }
    }

    fn attributes(operation: &str, product_id: Option<i32>) -> Vec<KeyValue> {
        let mut attributes = vec![
            KeyValue::new("component", "favorite"),
            KeyValue::new("operation", operation.to_string()),
        ];
        if let Some(product_id) = product_id {
            attributes.push(KeyValue::new("product.id", i64::from(product_id)));
        }
        attributes
    }

    async fn snapshot_and_store(&self, product_id: i32) -> Result<FavoriteOutcome, ServiceError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| ServiceError::NotFound("Product does not exist".into()))?;

        let snapshot = serde_json::to_value(&product).map_err(RepositoryError::from)?;

        let created = self
            .favorites
            .create_if_absent(product_id, &snapshot)
            .await?;

        Ok(if created {
            FavoriteOutcome::Created
        } else {
            FavoriteOutcome::AlreadyExists
        })
    }
}

#[async_trait]
impl FavoriteServiceTrait for FavoriteService {
    async fn add_favorite(&self, product_id: i32) -> Result<FavoriteOutcome, ServiceError> {
        info!("⭐ Adding product {product_id} to favorites");

        let tracing_ctx = self.tracer.start(
            "add_favorite",
            Self::attributes("add_favorite", Some(product_id)),
        );

        let result = self.snapshot_and_store(product_id).await;

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Favorite product stored");

        result
    }

    async fn delete_favorite(&self, product_id: i32) -> Result<(), ServiceError> {
        info!("🗑️ Removing product {product_id} from favorites");

        let tracing_ctx = self.tracer.start(
            "delete_favorite",
            Self::attributes("delete_favorite", Some(product_id)),
        );

        let result = match self.favorites.delete_by_product_id(product_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::NotFound(
                "Product does not exist in favorites".into(),
            )),
            Err(e) => Err(ServiceError::from(e)),
        };

        self.tracer
            .finish(&tracing_ctx, Method::Delete, &result, "Favorite product deleted");

        result
    }

    async fn get_favorites(&self) -> Result<Vec<FavoriteResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("get_favorites", Self::attributes("get_favorites", None));

        let result = self
            .favorites
            .find_all()
            .await
            .map(|favorites| favorites.into_iter().map(FavoriteResponse::from).collect())
            .map_err(ServiceError::from);

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Favorites retrieved");

        result
    }
}
