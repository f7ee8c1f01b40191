mod favorite;
mod product;

pub use self::favorite::{FavoriteService, FavoriteServiceDeps};
pub use self::product::{PRODUCTS_CACHE_KEY, ProductQueryService, ProductQueryServiceDeps, product_cache_key};
