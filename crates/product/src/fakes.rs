use crate::model::product::MenuPosition;
use async_trait::async_trait;
use chrono::Duration;
use prometheus_client::registry::Registry;
use serde_json::json;
use shared::abstract_trait::CacheStoreTrait;
use sqlx::types::Json;
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

/// Cache store that keeps values in memory and remembers the TTL of each set.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, (String, Duration)>>,
    offline: AtomicBool,
}

impl InMemoryCacheStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Duration::zero()));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    /// Every call behaves like a Redis outage: reads miss, writes are dropped.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStoreTrait for InMemoryCacheStore {
    async fn get_raw(&self, key: &str) -> Option<String> {
        if self.is_offline() {
            return None;
        }
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    async fn set_raw(&self, key: &str, value: &str, expiration: Duration) {
        if self.is_offline() {
            return;
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expiration));
    }

    async fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

pub fn registry() -> Arc<tokio::sync::Mutex<Registry>> {
    Arc::new(tokio::sync::Mutex::new(Registry::default()))
}

pub fn menu_position(id: i32, name: &str) -> MenuPosition {
    MenuPosition {
        id,
        name: name.to_string(),
        cost: 12.5,
        kind: "pizza".into(),
        preview_link: Some("/unknown.png".into()),
        description: Some("Tasty".into()),
        characteristics: Json(json!({"kcal": 250, "protein": 11})),
        ingredients: Json(json!(["dough", "tomato", "mozzarella"])),
        additions: Json(json!(["olives", "extra cheese"])),
    }
}
