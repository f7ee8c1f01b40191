use crate::{
    abstract_trait::product::ProductQueryRepositoryTrait, model::product::MenuPosition,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

const SELECT_MENU_POSITION: &str = r#"
    SELECT id, name, cost, type, preview_link, description,
           characteristics, ingredients, additions
    FROM menu_positions
"#;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<MenuPosition>, RepositoryError> {
        info!("🔍 Fetching all menu positions");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products =
            sqlx::query_as::<_, MenuPosition>(&format!("{SELECT_MENU_POSITION} ORDER BY id"))
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| {
                    error!("❌ Failed to fetch menu positions: {:?}", e);
                    RepositoryError::from(e)
                })?;

        info!("✅ Fetched {} menu positions", products.len());

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MenuPosition>, RepositoryError> {
        info!("🆔 Fetching menu position by ID: {id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product =
            sqlx::query_as::<_, MenuPosition>(&format!("{SELECT_MENU_POSITION} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| {
                    error!("❌ Failed to fetch menu position {id}: {:?}", e);
                    RepositoryError::from(e)
                })?;

        match &product {
            Some(_) => info!("✅ Found menu position {id}"),
            None => info!("❌ Menu position {id} not found"),
        }

        Ok(product)
    }
}
