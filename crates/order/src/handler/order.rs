use crate::{
    abstract_trait::order::DynCheckoutService,
    domain::{cart::CartId, requests::order::CheckoutRequest, response::order::OrderResponse},
};
use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::Value;
use shared::{domain::responses::ApiResponse, errors::HttpError};
use tracing::debug;
use utoipa_axum::router::OpenApiRouter;

// A missing or non-object body is treated as an empty one so the caller
// still gets the more useful "Cart is empty" / "Missing address" answer.
// A readable body with a mistyped field is rejected by name.
fn parse_checkout(body: &[u8]) -> Result<CheckoutRequest, HttpError> {
    let mut fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return Ok(CheckoutRequest::default()),
        Err(e) => {
            if !body.is_empty() {
                debug!("Unreadable checkout body, treating as empty: {e}");
            }
            return Ok(CheckoutRequest::default());
        }
    };

    let address = fields.remove("address").filter(|value| !value.is_null());

    let payment_currency = match fields.remove("payment_currency") {
        None | Some(Value::Null) => None,
        Some(Value::String(currency)) => Some(currency),
        Some(_) => {
            return Err(HttpError::BadRequest(
                "payment_currency must be a string".into(),
            ));
        }
    };

    Ok(CheckoutRequest {
        address,
        payment_currency,
    })
}

#[utoipa::path(
    post,
    path = "/api/orders/make_order",
    tag = "Order",
    params(("X-Cart-Id" = Option<String>, Header, description = "Cart to check out")),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Cart is empty, address missing or invalid, or a field has the wrong type"),
        (status = 500, description = "Order could not be saved")
    )
)]
pub async fn make_order(
    Extension(service): Extension<DynCheckoutService>,
    cart: CartId,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let req = parse_checkout(&body)?;

    let order = service.checkout(&cart, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Order created successfully", order)),
    ))
}

pub fn order_routes(service: DynCheckoutService) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders/make_order", post(make_order))
        .layer(Extension(service))
}
