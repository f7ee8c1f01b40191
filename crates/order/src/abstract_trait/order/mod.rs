mod repository;
mod service;

pub use self::repository::{DynOrderCommandRepository, OrderCommandRepositoryTrait};
pub use self::service::{CheckoutServiceTrait, DynCheckoutService};

#[cfg(test)]
pub use self::repository::MockOrderCommandRepositoryTrait;
#[cfg(test)]
pub use self::service::MockCheckoutServiceTrait;
