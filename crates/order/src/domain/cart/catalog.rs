use crate::domain::cart::{ProductInfo, RawAdditions, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use std::str::FromStr;

/// A menu position as served by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i32,
    pub name: String,
    pub cost: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preview_link: Option<String>,
    #[serde(default)]
    pub additions: Option<RawAdditions>,
}

/// Converts a float price to 6-digit fixed point via its shortest decimal form,
/// so `12.5` becomes exactly `12.500000`.
pub fn normalize_cost(cost: f64) -> Result<Decimal, ServiceError> {
    if !cost.is_finite() {
        return Err(ServiceError::Upstream(format!(
            "catalog returned a non-finite cost: {cost}"
        )));
    }

    let exact = Decimal::from_str(&cost.to_string()).map_err(|e| {
        ServiceError::Upstream(format!("catalog cost {cost} is not representable: {e}"))
    })?;

    Ok(round_money(exact))
}

impl CatalogProduct {
    pub fn into_product_info(self) -> Result<ProductInfo, ServiceError> {
        Ok(ProductInfo {
            name: self.name,
            cost: normalize_cost(self.cost)?,
            kind: self.kind,
            description: self.description,
            preview_link: self.preview_link,
            additions: self.additions.unwrap_or_default().normalize(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn cost_uses_shortest_decimal_representation() {
        assert_eq!(normalize_cost(12.5).unwrap().to_string(), "12.500000");
        assert_eq!(normalize_cost(0.1).unwrap().to_string(), "0.100000");
        assert_eq!(normalize_cost(9.99).unwrap().to_string(), "9.990000");
        assert_eq!(normalize_cost(1.0000005).unwrap().to_string(), "1.000001");
    }

    #[test]
    fn non_finite_cost_is_rejected() {
        assert!(matches!(
            normalize_cost(f64::NAN),
            Err(ServiceError::Upstream(_))
        ));
    }

    #[test]
    fn list_additions_become_unselected() {
        let product: CatalogProduct = serde_json::from_str(
            r#"{"id":42,"name":"Pepperoni","cost":12.5,"type":"pizza","preview_link":"/p.png","description":null,"characteristics":{},"ingredients":[],"additions":["A","B"]}"#,
        )
        .unwrap();

        let info = product.into_product_info().unwrap();
        assert_eq!(
            info.additions,
            BTreeMap::from([("A".to_string(), false), ("B".to_string(), false)])
        );
        assert_eq!(info.preview_link.as_deref(), Some("/p.png"));
    }
}
