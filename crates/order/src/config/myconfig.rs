use anyhow::{Context, Result};
use shared::config::{env_bool, env_or, env_required};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub main_service_uri: String,
    pub port: u16,
    pub cart_ttl_seconds: u64,
    pub default_currency: String,
    pub catalog_timeout_secs: u64,
    pub run_migrations: bool,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url = env_required("ORDERS_DATABASE_URL")?;
        let redis_url = env_required("REDIS_URL")?;
        let main_service_uri = env_required("MAIN_SERVICE_URI")?;

        let port = env_or("PORT", 5000u16).context("PORT must be a valid u16 integer")?;

        let cart_ttl_seconds = env_or("CART_TTL_SECONDS", 172_800u64)
            .context("CART_TTL_SECONDS must be a number of seconds")?;

        let default_currency = env_or("DEFAULT_CURRENCY", "LTC".to_string())?;

        let catalog_timeout_secs = env_or("CATALOG_TIMEOUT_SECS", 10u64)
            .context("CATALOG_TIMEOUT_SECS must be a number of seconds")?;

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
            redis_url,
            main_service_uri,
            port,
            cart_ttl_seconds,
            default_currency,
            catalog_timeout_secs,
            run_migrations,
            db_max_conn,
            db_min_conn,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}
