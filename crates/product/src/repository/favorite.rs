use crate::{abstract_trait::favorite::FavoriteRepositoryTrait, model::favorite::Favorite};
use async_trait::async_trait;
use serde_json::Value;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

#[derive(Clone)]
pub struct FavoriteRepository {
    db: ConnectionPool,
}

impl FavoriteRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteRepositoryTrait for FavoriteRepository {
    async fn create_if_absent(
        &self,
        product_id: i32,
        product_info: &Value,
    ) -> Result<bool, RepositoryError> {
        // The unique index on product_id settles concurrent inserts of the same favorite.
        let inserted: Option<i32> = sqlx::query_scalar(
            r#"
            INSERT INTO favorites_products (product_id, product_info)
            VALUES ($1, $2)
            ON CONFLICT (product_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(product_id)
        .bind(Json(product_info))
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert favorite for product {product_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        match inserted {
            Some(id) => {
                info!("✅ Created favorite {id} for product {product_id}");
                Ok(true)
            }
            None => {
                info!("Product {product_id} is already a favorite");
                Ok(false)
            }
        }
    }

    async fn delete_by_product_id(&self, product_id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM favorites_products WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete favorite for product {product_id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted favorite for product {product_id}");
        }

        Ok(deleted)
    }

    async fn find_all(&self) -> Result<Vec<Favorite>, RepositoryError> {
        info!("🔍 Fetching all favorites");

        sqlx::query_as::<_, Favorite>(
            "SELECT id, product_id, product_info FROM favorites_products ORDER BY id",
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch favorites: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
