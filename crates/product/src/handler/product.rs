use crate::{
    abstract_trait::product::DynProductQueryService,
    domain::response::product::{ProductListResponse, SingleProductResponse},
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/main/get_products",
    tag = "Product",
    responses(
        (status = 200, description = "All menu positions", body = ProductListResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.get_products().await?;

    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/api/main/get_product/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Menu position", body = SingleProductResponse),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.get_product(id).await?;

    Ok((StatusCode::OK, Json(product)))
}

pub fn product_routes(service: DynProductQueryService) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/main/get_products", get(get_products))
        .route("/api/main/get_product/{id}", get(get_product))
        .layer(Extension(service))
}
