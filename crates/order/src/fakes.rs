use crate::{
    abstract_trait::cart::CartStoreTrait,
    domain::cart::{CartId, CartLine, CatalogProduct, RawAdditions, StoredLine},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::errors::RepositoryError;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

type Hash = BTreeMap<i32, String>;
type Interference = Box<dyn FnOnce(&mut Hash) + Send>;

/// Cart store with Redis hash semantics: an emptied hash disappears.
#[derive(Default)]
pub struct InMemoryCartStore {
    carts: Mutex<HashMap<String, Hash>>,
    ttl_refreshes: AtomicUsize,
    fail_clear: AtomicBool,
    fail_ttl: AtomicBool,
    interference: Mutex<Option<Interference>>,
}

impl InMemoryCartStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_raw(&self, cart: &CartId, product_id: i32, raw: &str) {
        let mut carts = self.carts.lock().unwrap();
        carts
            .entry(cart.redis_key())
            .or_default()
            .insert(product_id, raw.to_string());
    }

    pub fn raw_line(&self, cart: &CartId, product_id: i32) -> Option<String> {
        let carts = self.carts.lock().unwrap();
        carts
            .get(&cart.redis_key())
            .and_then(|hash| hash.get(&product_id).cloned())
    }

    pub fn exists(&self, cart: &CartId) -> bool {
        self.carts.lock().unwrap().contains_key(&cart.redis_key())
    }

    pub fn ttl_refreshes(&self) -> usize {
        self.ttl_refreshes.load(Ordering::SeqCst)
    }

    pub fn fail_clear(&self) {
        self.fail_clear.store(true, Ordering::SeqCst);
    }

    pub fn fail_ttl(&self) {
        self.fail_ttl.store(true, Ordering::SeqCst);
    }

    /// Runs `f` against the cart hash right before the next conditional write,
    /// as if another request had written in between.
    pub fn interfere_once(&self, f: impl FnOnce(&mut Hash) + Send + 'static) {
        *self.interference.lock().unwrap() = Some(Box::new(f));
    }

    fn decode(raw: &str) -> Result<StoredLine, RepositoryError> {
        Ok(StoredLine {
            line: serde_json::from_str(raw)?,
            raw: raw.to_string(),
        })
    }
}

#[async_trait]
impl CartStoreTrait for InMemoryCartStore {
    async fn get_line(
        &self,
        cart: &CartId,
        product_id: i32,
    ) -> Result<Option<StoredLine>, RepositoryError> {
        self.raw_line(cart, product_id)
            .map(|raw| Self::decode(&raw))
            .transpose()
    }

    async fn put_line(&self, cart: &CartId, line: &CartLine) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(line)?;
        self.seed_raw(cart, line.product_id, &raw);
        Ok(())
    }

    async fn swap_line(
        &self,
        cart: &CartId,
        product_id: i32,
        expected: Option<&StoredLine>,
        replacement: Option<&CartLine>,
    ) -> Result<bool, RepositoryError> {
        let replacement = replacement.map(serde_json::to_string).transpose()?;
        let interference = self.interference.lock().unwrap().take();

        let mut carts = self.carts.lock().unwrap();
        let key = cart.redis_key();
        let hash = carts.entry(key.clone()).or_default();

        if let Some(interfere) = interference {
            interfere(hash);
        }

        let current = hash.get(&product_id).map(String::as_str);
        if current != expected.map(|stored| stored.raw.as_str()) {
            if hash.is_empty() {
                carts.remove(&key);
            }
            return Ok(false);
        }

        match replacement {
            Some(raw) => {
                hash.insert(product_id, raw);
            }
            None => {
                hash.remove(&product_id);
            }
        }

        if hash.is_empty() {
            carts.remove(&key);
        }

        Ok(true)
    }

    async fn delete_line(&self, cart: &CartId, product_id: i32) -> Result<bool, RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let key = cart.redis_key();

        let Some(hash) = carts.get_mut(&key) else {
            return Ok(false);
        };

        let removed = hash.remove(&product_id).is_some();
        if hash.is_empty() {
            carts.remove(&key);
        }

        Ok(removed)
    }

    async fn get_all_lines(&self, cart: &CartId) -> Result<Vec<CartLine>, RepositoryError> {
        let raws: Vec<String> = {
            let carts = self.carts.lock().unwrap();
            carts
                .get(&cart.redis_key())
                .map(|hash| hash.values().cloned().collect())
                .unwrap_or_default()
        };

        raws.iter()
            .map(|raw| Self::decode(raw).map(|stored| stored.line))
            .collect()
    }

    async fn line_count(&self, cart: &CartId) -> Result<usize, RepositoryError> {
        let carts = self.carts.lock().unwrap();
        Ok(carts.get(&cart.redis_key()).map_or(0, BTreeMap::len))
    }

    async fn clear(&self, cart: &CartId) -> Result<(), RepositoryError> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("redis is down".into()));
        }

        self.carts.lock().unwrap().remove(&cart.redis_key());
        Ok(())
    }

    async fn refresh_ttl(&self, _cart: &CartId) -> Result<(), RepositoryError> {
        if self.fail_ttl.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("redis is down".into()));
        }

        self.ttl_refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn registry() -> Arc<tokio::sync::Mutex<Registry>> {
    Arc::new(tokio::sync::Mutex::new(Registry::default()))
}

pub fn catalog_product(id: i32, cost: f64, additions: &[&str]) -> CatalogProduct {
    CatalogProduct {
        id,
        name: format!("Product {id}"),
        cost,
        kind: "pizza".into(),
        description: Some("Tasty".into()),
        preview_link: Some(format!("/img/{id}.png")),
        additions: Some(RawAdditions::List(
            additions.iter().map(|name| name.to_string()).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_line_upserts_and_reads_back() {
        let store = InMemoryCartStore::new();
        let cart = CartId::default();
        let info = catalog_product(5, 8.0, &["olives"]).into_product_info().unwrap();

        let mut line = CartLine::new(5, info);
        store.put_line(&cart, &line).await.unwrap();
        let first = store.get_line(&cart, 5).await.unwrap().unwrap();
        assert_eq!(first.line, line);

        line.quantity = 3;
        store.put_line(&cart, &line).await.unwrap();
        let second = store.get_line(&cart, 5).await.unwrap().unwrap();

        assert_eq!(second.line.quantity, 3);
        assert_ne!(second.raw, first.raw);
        assert_eq!(store.line_count(&cart).await.unwrap(), 1);
    }
}
