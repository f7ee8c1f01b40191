mod favorite;
mod product;

pub use self::favorite::FavoriteRepository;
pub use self::product::ProductQueryRepository;
