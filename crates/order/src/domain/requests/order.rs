use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Checkout payload. Validation happens in the checkout service because an
/// empty cart must be reported before a missing address.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct CheckoutRequest {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub address: Option<Value>,

    #[serde(default)]
    pub payment_currency: Option<String>,
}
