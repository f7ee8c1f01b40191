pub mod favorite;
pub mod product;
