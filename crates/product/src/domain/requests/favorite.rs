use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of both `POST /favorite` and `DELETE /favorite`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct FavoriteRequest {
    #[validate(
        required(message = "Product ID is required"),
        range(min = 1, message = "Product ID must be positive")
    )]
    pub product_id: Option<i32>,
}
