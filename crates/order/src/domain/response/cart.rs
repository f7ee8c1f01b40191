use crate::domain::cart::{AddOutcome, CartLine, DecrementOutcome};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CartUpdateResult {
    Added,
    Incremented,
    Decremented,
    Removed,
}

impl From<AddOutcome> for CartUpdateResult {
    fn from(value: AddOutcome) -> Self {
        match value {
            AddOutcome::Added => CartUpdateResult::Added,
            AddOutcome::Incremented => CartUpdateResult::Incremented,
        }
    }
}

impl From<DecrementOutcome> for CartUpdateResult {
    fn from(value: DecrementOutcome) -> Self {
        match value {
            DecrementOutcome::Decremented => CartUpdateResult::Decremented,
            DecrementOutcome::Removed => CartUpdateResult::Removed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartUpdateResponse {
    pub product_id: i32,
    pub result: CartUpdateResult,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ToggleAdditionResponse {
    pub addition_name: String,
    pub new_state: bool,
    pub product_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartResponse {
    pub cart: Vec<CartLine>,
    pub total: f64,
    pub count: usize,
}
