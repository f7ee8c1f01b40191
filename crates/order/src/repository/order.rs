use crate::{
    abstract_trait::order::OrderCommandRepositoryTrait,
    model::order::{NewOrder, UserOrder},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, req: &NewOrder) -> Result<UserOrder, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let inserted = sqlx::query_as::<_, UserOrder>(
            r#"
            INSERT INTO user_orders (order_time, payment_sum, payment_currency, positions, address, paid)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, order_time, payment_sum, payment_currency, positions, address, paid
            "#,
        )
        .bind(req.order_time)
        .bind(req.payment_sum)
        .bind(&req.payment_currency)
        .bind(Json(&req.positions))
        .bind(Json(&req.address))
        .bind(req.paid)
        .fetch_one(&mut *tx)
        .await;

        let order = match inserted {
            Ok(order) => order,
            Err(err) => {
                error!("❌ Failed to insert order: {err:?}");
                if let Err(rollback_err) = tx.rollback().await {
                    error!("❌ Failed to roll back order transaction: {rollback_err:?}");
                }
                return Err(RepositoryError::from(err));
            }
        };

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order {}: {err:?}", order.id);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order ID {} ({} positions, {} {})",
            order.id,
            order.positions.len(),
            order.payment_sum,
            order.payment_currency
        );

        Ok(order)
    }
}
