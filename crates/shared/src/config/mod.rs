mod database;
mod env;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::env::{env_bool, env_or, env_required};
pub use self::redis::RedisClient;
