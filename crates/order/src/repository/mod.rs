mod cart;
mod order;

pub use self::cart::RedisCartStore;
pub use self::order::OrderCommandRepository;
