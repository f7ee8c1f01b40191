mod repository;
mod service;

pub use self::repository::{DynFavoriteRepository, FavoriteRepositoryTrait};
pub use self::service::{DynFavoriteService, FavoriteServiceTrait};

#[cfg(test)]
pub use self::repository::MockFavoriteRepositoryTrait;
#[cfg(test)]
pub use self::service::MockFavoriteServiceTrait;
