mod cache;

pub use self::cache::{CacheStoreExt, CacheStoreTrait, DynCacheStore};
