use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct AddToCartRequest {
    #[validate(
        required(message = "Product ID is required"),
        range(min = 1, message = "Product ID is required")
    )]
    pub product_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct ToggleAdditionRequest {
    #[validate(
        required(message = "Addition name is required"),
        length(min = 1, message = "Addition name is required")
    )]
    pub addition_name: Option<String>,
}
