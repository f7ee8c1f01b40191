use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, types::Json};

/// A row of `menu_positions`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MenuPosition {
    pub id: i32,
    pub name: String,
    pub cost: f64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub preview_link: Option<String>,
    pub description: Option<String>,
    pub characteristics: Json<Value>,
    pub ingredients: Json<Value>,
    /// Either a list of names or a name to selected map.
    pub additions: Json<Value>,
}
