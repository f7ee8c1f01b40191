use anyhow::{Context, Result};
use shared::config::{env_bool, env_or, env_required};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub cache_redis_url: String,
    pub products_cache_ttl: i64,
    pub port: u16,
    pub run_migrations: bool,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url = env_required("MAIN_DATABASE_URL")?;
        let cache_redis_url = env_required("CACHE_REDIS_URL")?;

        let products_cache_ttl = env_or("PRODUCTS_CACHE_TTL", 21_600i64)
            .context("PRODUCTS_CACHE_TTL must be a number of seconds")?;

        let port = env_or("PORT", 5000u16).context("PORT must be a valid u16 integer")?;

        let run_migrations = env_bool("RUN_MIGRATIONS", true)?;

        let db_max_conn = env_or("DB_MAX_CONNECTION", 5u32)
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;
        let db_min_conn = env_or("DB_MIN_CONNECTION", 1u32)
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        let otel_endpoint = env_or(
            "OTEL_ENDPOINT",
            "http://otel-collector:4317".to_string(),
        )?;

        let is_dev = env_bool("DEV_MODE", false)?;
        let enable_file_log = env_bool("ENABLE_FILE_LOG", false)?;

        Ok(Self {
            database_url,
            cache_redis_url,
            products_cache_ttl,
            port,
            run_migrations,
            db_max_conn,
            db_min_conn,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}
