mod repository;
mod service;

pub use self::repository::{CartStoreTrait, DynCartStore};
pub use self::service::{CartServiceTrait, DynCartService};

#[cfg(test)]
pub use self::service::MockCartServiceTrait;
