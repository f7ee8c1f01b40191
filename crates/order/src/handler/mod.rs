mod cart;
mod order;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::cart::cart_routes;
pub use self::order::order_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        cart::add_to_cart,
        cart::decrement_in_cart,
        cart::remove_from_cart,
        cart::toggle_addition,
        cart::get_cart,
        cart::clear_cart,

        order::make_order,
    ),
    tags(
        (name = "Cart", description = "Shopping cart endpoints"),
        (name = "Order", description = "Checkout endpoints"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub struct AppRouter;

impl AppRouter {
    pub fn router(shared_state: Arc<AppState>) -> axum::Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/api/orders/metrics", get(metrics_handler))
            .route("/api/orders/health", get(health_check))
            .with_state(shared_state.clone())
            .merge(cart_routes(shared_state.di_container.cart_service.clone()))
            .merge(order_routes(
                shared_state.di_container.checkout_service.clone(),
            ));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::router(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Orders service running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/api/orders/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Orders HTTP server failed")?;

        Ok(())
    }
}
