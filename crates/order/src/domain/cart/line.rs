use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use shared::errors::ServiceError;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const MONEY_SCALE: u32 = 6;

/// Additions as the catalog sends them: either bare names or a name to
/// selected-state map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RawAdditions {
    List(Vec<String>),
    Map(BTreeMap<String, bool>),
}

impl Default for RawAdditions {
    fn default() -> Self {
        RawAdditions::Map(BTreeMap::new())
    }
}

impl RawAdditions {
    pub fn normalize(self) -> BTreeMap<String, bool> {
        match self {
            RawAdditions::List(names) => names.into_iter().map(|name| (name, false)).collect(),
            RawAdditions::Map(map) => map,
        }
    }
}

fn additions_from_raw<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAdditions>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().normalize())
}

/// Catalog data captured when the product first entered the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductInfo {
    pub name: String,
    #[schema(value_type = String, example = "12.500000")]
    pub cost: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preview_link: Option<String>,
    #[serde(default, deserialize_with = "additions_from_raw")]
    pub additions: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub product_id: i32,
    pub quantity: u32,
    pub product_info: ProductInfo,
}

impl CartLine {
    pub fn new(product_id: i32, product_info: ProductInfo) -> Self {
        Self {
            product_id,
            quantity: 1,
            product_info,
        }
    }

    pub fn subtotal(&self) -> Result<Decimal, ServiceError> {
        self.product_info
            .cost
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| money_overflow(self.product_id))
    }

    /// Names of the selected additions, in name order.
    pub fn active_additions(&self) -> Vec<String> {
        self.product_info
            .additions
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// A line as read from the store, together with the exact bytes it was
/// decoded from. Conditional writes compare against `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLine {
    pub line: CartLine,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Incremented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    Decremented,
    Removed,
}

pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Float view of an amount, parsed from its decimal text so `36.48` stays `36.48`.
pub fn money_to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or_default()
}

fn money_overflow(product_id: i32) -> ServiceError {
    ServiceError::Internal(format!("Amount overflow for product {product_id}"))
}

pub fn cart_total(lines: &[CartLine]) -> Result<Decimal, ServiceError> {
    let mut total = Decimal::ZERO;
    for line in lines {
        total = total
            .checked_add(line.subtotal()?)
            .ok_or_else(|| money_overflow(line.product_id))?;
    }
    Ok(round_money(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn line(product_id: i32, cost: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id,
            quantity,
            product_info: ProductInfo {
                name: format!("product {product_id}"),
                cost: Decimal::from_str(cost).unwrap(),
                kind: "pizza".into(),
                description: None,
                preview_link: None,
                additions: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn total_is_sum_of_line_subtotals() {
        let total = cart_total(&[line(1, "9.99", 2), line(2, "5.5", 3)]).unwrap();
        assert_eq!(total, Decimal::from_str("36.48").unwrap());
        assert_eq!(total.to_string(), "36.480000");
    }

    #[test]
    fn float_view_matches_literal() {
        assert_eq!(money_to_f64(Decimal::from_str("36.480000").unwrap()), 36.48);
        assert_eq!(money_to_f64(Decimal::from_str("19.980000").unwrap()), 19.98);
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(cart_total(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn overflowing_subtotal_is_an_internal_error() {
        let mut huge = line(4, "1", u32::MAX);
        huge.product_info.cost = Decimal::MAX;

        assert!(matches!(huge.subtotal(), Err(ServiceError::Internal(_))));
        assert!(matches!(cart_total(&[huge]), Err(ServiceError::Internal(_))));
    }

    #[test]
    fn overflowing_sum_is_an_internal_error() {
        let mut a = line(5, "1", 1);
        a.product_info.cost = Decimal::MAX;
        let b = line(6, "1", 1);

        match cart_total(&[a, b]) {
            Err(ServiceError::Internal(msg)) => assert!(msg.contains("overflow")),
            other => panic!("expected overflow error, got {other:?}"),
        }
    }

    #[test]
    fn money_rounds_half_away_from_zero() {
        assert_eq!(
            round_money(Decimal::from_str("0.0000005").unwrap()).to_string(),
            "0.000001"
        );
        assert_eq!(
            round_money(Decimal::from_str("-0.0000005").unwrap()).to_string(),
            "-0.000001"
        );
    }

    #[test]
    fn stored_lines_accept_both_addition_shapes() {
        let listed: CartLine = serde_json::from_str(
            r#"{"product_id":7,"quantity":1,"product_info":{"name":"Margherita","cost":"10.5","type":"pizza","additions":["cheese","olives"]}}"#,
        )
        .unwrap();
        assert_eq!(
            listed.product_info.additions,
            BTreeMap::from([("cheese".to_string(), false), ("olives".to_string(), false)])
        );

        let mapped: CartLine = serde_json::from_str(
            r#"{"product_id":7,"quantity":1,"product_info":{"name":"Margherita","cost":10.5,"type":"pizza","additions":{"cheese":true}}}"#,
        )
        .unwrap();
        assert_eq!(
            mapped.product_info.additions,
            BTreeMap::from([("cheese".to_string(), true)])
        );
        assert_eq!(mapped.product_info.cost, Decimal::from_str("10.5").unwrap());
    }

    #[test]
    fn cost_is_stored_as_exact_string() {
        let mut l = line(3, "12.5", 1);
        l.product_info.cost = round_money(l.product_info.cost);

        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["product_info"]["cost"], "12.500000");
        assert_eq!(json["product_info"]["type"], "pizza");
    }

    #[test]
    fn only_selected_additions_are_active() {
        let mut l = line(1, "1", 1);
        l.product_info.additions =
            BTreeMap::from([("b".to_string(), true), ("a".to_string(), true), ("c".to_string(), false)]);
        assert_eq!(l.active_additions(), vec!["a", "b"]);
    }
}
