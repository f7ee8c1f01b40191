mod catalog;
mod id;
mod line;

pub use self::catalog::{CatalogProduct, normalize_cost};
pub use self::id::{CART_ID_HEADER, CartId, DEFAULT_CART_ID};
pub use self::line::{
    AddOutcome, CartLine, DecrementOutcome, ProductInfo, RawAdditions, StoredLine, cart_total,
    money_to_f64, round_money,
};
