mod cart;
mod checkout;

pub use self::cart::{CartService, CartServiceDeps};
pub use self::checkout::{CheckoutService, CheckoutServiceDeps};
