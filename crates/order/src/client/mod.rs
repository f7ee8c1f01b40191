mod catalog;

pub use self::catalog::CatalogHttpClient;
