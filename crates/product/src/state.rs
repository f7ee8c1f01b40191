use crate::{
    config::myconfig::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    config::{ConnectionPool, RedisClient},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: Config) -> Result<Self> {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        info!("Initializing Redis connection for product cache");
        let redis =
            RedisClient::new(&config.cache_redis_url).context("Failed to connect to Redis")?;

        // Cache calls turn into misses while Redis is down.
        if let Err(e) = redis.ping().await {
            warn!("⚠️ Product cache unavailable at startup: {e:#}");
        }

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            pool,
            redis,
            config,
            registry: registry.clone(),
        })
        .await
        .context("Failed to initialize dependency injection container")?;

        system_metrics.register(&mut *registry.lock().await);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Ok(Self {
            di_container,
            registry,
            system_metrics,
        })
    }
}
