use crate::model::product::MenuPosition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Public shape of a menu position. This is also what gets cached and what
/// favorites snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub cost: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub preview_link: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub characteristics: Value,
    #[schema(value_type = Object)]
    pub ingredients: Value,
    #[schema(value_type = Object)]
    pub additions: Value,
}

impl From<MenuPosition> for ProductResponse {
    fn from(value: MenuPosition) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            cost: value.cost,
            kind: value.kind,
            preview_link: value.preview_link,
            description: value.description,
            characteristics: value.characteristics.0,
            ingredients: value.ingredients.0,
            additions: value.additions.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub count: usize,
    pub cached: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SingleProductResponse {
    pub product: ProductResponse,
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::types::Json;

    #[test]
    fn serializes_kind_as_type() {
        let product = ProductResponse::from(MenuPosition {
            id: 42,
            name: "Pepperoni".into(),
            cost: 12.5,
            kind: "pizza".into(),
            preview_link: Some("/pepperoni.png".into()),
            description: None,
            characteristics: Json(json!({"kcal": 250})),
            ingredients: Json(json!(["cheese", "pepperoni"])),
            additions: Json(json!(["olives"])),
        });

        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["type"], "pizza");
        assert_eq!(value["cost"], 12.5);
        assert_eq!(value["additions"], json!(["olives"]));
        assert!(value.get("kind").is_none());
        assert!(value["description"].is_null());
    }
}
