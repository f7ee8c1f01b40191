use crate::{
    abstract_trait::cart::DynCartService,
    domain::{
        cart::{AddOutcome, CartId, DecrementOutcome, cart_total, money_to_f64},
        requests::cart::{AddToCartRequest, ToggleAdditionRequest},
        response::cart::{CartResponse, CartUpdateResponse, ToggleAdditionResponse},
    },
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use shared::{
    domain::responses::{ApiResponse, MessageResponse},
    errors::HttpError,
    middleware::SimpleValidatedJson,
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders/cart",
    tag = "Cart",
    params(("X-Cart-Id" = Option<String>, Header, description = "Cart to operate on")),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Product added or its quantity increased", body = ApiResponse<CartUpdateResponse>),
        (status = 400, description = "Missing or invalid product_id"),
        (status = 404, description = "Product does not exist"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartService>,
    cart: CartId,
    SimpleValidatedJson(body): SimpleValidatedJson<AddToCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let Some(product_id) = body.product_id else {
        return Err(HttpError::BadRequest("Product ID is required".into()));
    };

    let outcome = service.add_from_catalog(&cart, product_id).await?;

    let message = match outcome {
        AddOutcome::Added => "Product added to cart",
        AddOutcome::Incremented => "Product quantity increased in cart",
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            message,
            CartUpdateResponse {
                product_id,
                result: outcome.into(),
            },
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/orders/cart/{product_id}/decrement",
    tag = "Cart",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("X-Cart-Id" = Option<String>, Header, description = "Cart to operate on")
    ),
    responses(
        (status = 200, description = "Quantity decreased or line removed", body = ApiResponse<CartUpdateResponse>),
        (status = 404, description = "Product not found in cart"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn decrement_in_cart(
    Extension(service): Extension<DynCartService>,
    cart: CartId,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = service.decrement_or_remove(&cart, product_id).await?;

    let message = match outcome {
        DecrementOutcome::Decremented => "Product quantity decreased in cart",
        DecrementOutcome::Removed => "Product removed from cart (quantity was 1)",
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            message,
            CartUpdateResponse {
                product_id,
                result: outcome.into(),
            },
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/orders/cart/{product_id}",
    tag = "Cart",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("X-Cart-Id" = Option<String>, Header, description = "Cart to operate on")
    ),
    responses(
        (status = 200, description = "Line removed", body = MessageResponse),
        (status = 404, description = "Product not found in cart"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_from_cart(
    Extension(service): Extension<DynCartService>,
    cart: CartId,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    if !service.remove(&cart, product_id).await? {
        return Err(HttpError::NotFound("Product not found in cart".into()));
    }

    Ok((
        StatusCode::OK,
        Json(MessageResponse::success("Product removed from cart")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/orders/cart/{product_id}/toggle_addition",
    tag = "Cart",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("X-Cart-Id" = Option<String>, Header, description = "Cart to operate on")
    ),
    request_body = ToggleAdditionRequest,
    responses(
        (status = 200, description = "Addition toggled", body = ApiResponse<ToggleAdditionResponse>),
        (status = 400, description = "Missing name or addition not available"),
        (status = 404, description = "Product not found in cart"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn toggle_addition(
    Extension(service): Extension<DynCartService>,
    cart: CartId,
    Path(product_id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<ToggleAdditionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let Some(addition_name) = body.addition_name else {
        return Err(HttpError::BadRequest("Addition name is required".into()));
    };

    let new_state = service
        .toggle_addition(&cart, product_id, &addition_name)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            format!("Addition \"{addition_name}\" toggled"),
            ToggleAdditionResponse {
                addition_name,
                new_state,
                product_id,
            },
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders/cart",
    tag = "Cart",
    params(("X-Cart-Id" = Option<String>, Header, description = "Cart to operate on")),
    responses(
        (status = 200, description = "Cart contents and total", body = CartResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    cart: CartId,
) -> Result<impl IntoResponse, HttpError> {
    let lines = service.get_cart(&cart).await?;
    let total = cart_total(&lines)?;

    Ok((
        StatusCode::OK,
        Json(CartResponse {
            count: lines.len(),
            cart: lines,
            total: money_to_f64(total),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/orders/cart",
    tag = "Cart",
    params(("X-Cart-Id" = Option<String>, Header, description = "Cart to operate on")),
    responses(
        (status = 200, description = "Cart cleared", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartService>,
    cart: CartId,
) -> Result<impl IntoResponse, HttpError> {
    service.clear_cart(&cart).await?;

    Ok((StatusCode::OK, Json(MessageResponse::success("Cart cleared"))))
}

pub fn cart_routes(service: DynCartService) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders/cart", post(add_to_cart))
        .route("/api/orders/cart", get(get_cart))
        .route("/api/orders/cart", delete(clear_cart))
        .route("/api/orders/cart/{product_id}", delete(remove_from_cart))
        .route(
            "/api/orders/cart/{product_id}/decrement",
            post(decrement_in_cart),
        )
        .route(
            "/api/orders/cart/{product_id}/toggle_addition",
            post(toggle_addition),
        )
        .layer(Extension(service))
}
