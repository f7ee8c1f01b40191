use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, types::Json};
use utoipa::ToSchema;

/// Immutable snapshot of one cart line inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderPosition {
    pub product_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub quantity: u32,
    pub total: f64,
    pub additions: Vec<String>,
    pub preview_link: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_time: NaiveDateTime,
    pub payment_sum: Decimal,
    pub payment_currency: String,
    pub positions: Vec<OrderPosition>,
    pub address: Value,
    pub paid: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserOrder {
    pub id: i32,
    pub order_time: NaiveDateTime,
    pub payment_sum: Decimal,
    pub payment_currency: String,
    pub positions: Json<Vec<OrderPosition>>,
    pub address: Json<Value>,
    pub paid: bool,
}
