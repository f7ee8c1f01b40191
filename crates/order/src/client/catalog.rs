use crate::{abstract_trait::catalog::CatalogClientTrait, domain::cart::CatalogProduct};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use opentelemetry::{Context, global};
use reqwest::{StatusCode, header::HeaderMap};
use serde::Deserialize;
use shared::{errors::ServiceError, utils::HeaderInjector};
use std::time::Duration;
use tracing::{error, info};

/// Body of `GET /get_product/{id}`: `{"product": {...}, "cached": bool}`.
#[derive(Debug, Deserialize)]
struct ProductLookup {
    product: CatalogProduct,
}

/// Looks products up in the main service over HTTP.
#[derive(Clone)]
pub struct CatalogHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogHttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build catalog HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn trace_headers(cx: &Context) -> HeaderMap {
        let mut headers = HeaderMap::new();
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(cx, &mut HeaderInjector(&mut headers))
        });
        headers
    }
}

#[async_trait]
impl CatalogClientTrait for CatalogHttpClient {
    async fn find_product(
        &self,
        product_id: i32,
        cx: &Context,
    ) -> Result<Option<CatalogProduct>, ServiceError> {
        let url = format!("{}/get_product/{product_id}", self.base_url);

        info!("🔍 Looking up product {product_id} in catalog");

        let response = self
            .client
            .get(&url)
            .headers(Self::trace_headers(cx))
            .send()
            .await
            .map_err(|e| {
                error!("❌ Catalog service unavailable: {e}");
                ServiceError::Upstream(format!("Catalog service unavailable: {e}"))
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response
                    .json::<ProductLookup>()
                    .await
                    .map_err(|e| {
                        error!("❌ Invalid catalog response for product {product_id}: {e}");
                        ServiceError::Upstream(format!("Invalid catalog response: {e}"))
                    })?;

                Ok(Some(body.product))
            }
            status => {
                error!("❌ Catalog service returned {status} for product {product_id}");
                Err(ServiceError::Upstream(format!(
                    "Catalog service returned {status}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Path, http::StatusCode as AxumStatus, routing::get};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use tokio::net::TcpListener;

    async fn get_product(Path(id): Path<i32>) -> (AxumStatus, Json<Value>) {
        match id {
            42 => (
                AxumStatus::OK,
                Json(json!({
                    "product": {
                        "id": 42,
                        "name": "Pepperoni",
                        "cost": 12.5,
                        "type": "pizza",
                        "preview_link": "/pepperoni.png",
                        "description": "Spicy",
                        "characteristics": {"kcal": 900},
                        "ingredients": ["dough"],
                        "additions": ["cheese"]
                    },
                    "cached": false
                })),
            ),
            500 => (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "Internal server error"})),
            ),
            _ => (
                AxumStatus::NOT_FOUND,
                Json(json!({"status": "error", "message": "Product not found"})),
            ),
        }
    }

    async fn spawn_catalog() -> TestResult<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = Router::new().route("/api/main/get_product/{id}", get(get_product));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(format!("http://{addr}/api/main/"))
    }

    #[tokio::test]
    async fn finds_existing_product() -> TestResult {
        let client = CatalogHttpClient::new(spawn_catalog().await?, Duration::from_secs(5))?;

        let product = client.find_product(42, &Context::new()).await?;

        let product = product.expect("expected product");
        assert_eq!(product.id, 42);
        assert_eq!(product.cost, 12.5);
        assert_eq!(product.kind, "pizza");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_none() -> TestResult {
        let client = CatalogHttpClient::new(spawn_catalog().await?, Duration::from_secs(5))?;

        assert!(client.find_product(7, &Context::new()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn server_error_is_upstream_failure() -> TestResult {
        let client = CatalogHttpClient::new(spawn_catalog().await?, Duration::from_secs(5))?;

        let result = client.find_product(500, &Context::new()).await;

        assert!(matches!(result, Err(ServiceError::Upstream(_))));
        Ok(())
    }
}
