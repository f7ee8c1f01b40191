use crate::{
    abstract_trait::favorite::DynFavoriteService,
    domain::{
        requests::favorite::FavoriteRequest,
        response::favorite::{FavoriteOutcome, FavoriteResponse},
    },
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::responses::MessageResponse,
    errors::HttpError,
    middleware::SimpleValidatedJson,
};
use utoipa_axum::router::OpenApiRouter;

fn required_product_id(body: FavoriteRequest) -> Result<i32, HttpError> {
    body.product_id
        .ok_or_else(|| HttpError::BadRequest("Product ID is required".into()))
}

#[utoipa::path(
    post,
    path = "/api/main/favorite",
    tag = "Favorite",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Favorite product created", body = MessageResponse),
        (status = 208, description = "Favorite product already created", body = MessageResponse),
        (status = 400, description = "Missing or invalid product_id"),
        (status = 404, description = "Product does not exist"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_favorite(
    Extension(service): Extension<DynFavoriteService>,
    SimpleValidatedJson(body): SimpleValidatedJson<FavoriteRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product_id = required_product_id(body)?;

    let response = match service.add_favorite(product_id).await? {
        FavoriteOutcome::Created => (
            StatusCode::CREATED,
            Json(MessageResponse::success("Favorite product created")),
        ),
        FavoriteOutcome::AlreadyExists => (
            StatusCode::ALREADY_REPORTED,
            Json(MessageResponse::success("Favorite product already created")),
        ),
    };

    Ok(response)
}

#[utoipa::path(
    delete,
    path = "/api/main/favorite",
    tag = "Favorite",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite product deleted", body = MessageResponse),
        (status = 400, description = "Missing or invalid product_id"),
        (status = 404, description = "Product does not exist in favorites"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_favorite(
    Extension(service): Extension<DynFavoriteService>,
    SimpleValidatedJson(body): SimpleValidatedJson<FavoriteRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product_id = required_product_id(body)?;

    service.delete_favorite(product_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::success("Favorite product deleted")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/main/get_favorites",
    tag = "Favorite",
    responses(
        (status = 200, description = "All favorite products", body = Vec<FavoriteResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_favorites(
    Extension(service): Extension<DynFavoriteService>,
) -> Result<impl IntoResponse, HttpError> {
    let favorites = service.get_favorites().await?;

    Ok((StatusCode::OK, Json(favorites)))
}

pub fn favorite_routes(service: DynFavoriteService) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/main/favorite", post(add_favorite).delete(delete_favorite))
        .route("/api/main/get_favorites", get(get_favorites))
        .layer(Extension(service))
}
