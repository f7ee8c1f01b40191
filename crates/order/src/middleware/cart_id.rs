use crate::domain::cart::{CART_ID_HEADER, CartId};
use axum::{extract::FromRequestParts, http::request::Parts};
use shared::errors::HttpError;

/// Selects the cart from the `X-Cart-Id` header, defaulting to the shared cart.
impl<S> FromRequestParts<S> for CartId
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(CART_ID_HEADER) else {
            return Ok(CartId::default());
        };

        let raw = value
            .to_str()
            .map_err(|_| HttpError::BadRequest("X-Cart-Id must be visible ASCII".into()))?;

        CartId::new(raw).map_err(HttpError::from)
    }
}
