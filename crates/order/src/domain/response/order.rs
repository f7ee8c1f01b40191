use crate::{
    domain::cart::money_to_f64,
    model::order::{OrderPosition, UserOrder},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub order_id: i32,
    pub order_time: NaiveDateTime,
    pub payment_sum: f64,
    pub payment_currency: String,
    pub paid: bool,
    pub positions_count: usize,
    pub positions: Vec<OrderPosition>,
}

impl From<UserOrder> for OrderResponse {
    fn from(value: UserOrder) -> Self {
        let positions = value.positions.0;

        OrderResponse {
            order_id: value.id,
            order_time: value.order_time,
            payment_sum: money_to_f64(value.payment_sum),
            payment_currency: value.payment_currency,
            paid: value.paid,
            positions_count: positions.len(),
            positions,
        }
    }
}
