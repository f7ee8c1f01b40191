use crate::model::favorite::Favorite;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponse {
    pub id: i32,
    pub product_id: i32,
    /// Product as it looked when it was favorited.
    #[schema(value_type = Object)]
    pub product_info: Value,
}

impl From<Favorite> for FavoriteResponse {
    fn from(value: Favorite) -> Self {
        FavoriteResponse {
            id: value.id,
            product_id: value.product_id,
            product_info: value.product_info.0,
        }
    }
}

/// Whether a favorite was created by this call or already existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Created,
    AlreadyExists,
}
