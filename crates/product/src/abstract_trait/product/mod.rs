mod repository;
mod service;

pub use self::repository::{DynProductQueryRepository, ProductQueryRepositoryTrait};
pub use self::service::{DynProductQueryService, ProductQueryServiceTrait};

#[cfg(test)]
pub use self::repository::MockProductQueryRepositoryTrait;
#[cfg(test)]
pub use self::service::MockProductQueryServiceTrait;
