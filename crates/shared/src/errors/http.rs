use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),
            ServiceError::InvalidAddition(msg) => HttpError::BadRequest(msg),
            ServiceError::EmptyCart => HttpError::BadRequest("Cart is empty".into()),
            ServiceError::MissingAddress => HttpError::BadRequest("Missing address".into()),
            ServiceError::InvalidAddress => HttpError::BadRequest("Invalid address".into()),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),
            ServiceError::Repo(RepositoryError::NotFound) => HttpError::NotFound("Not found".into()),

            ServiceError::OrderPersistence(_) => {
                HttpError::Internal("Order could not be saved, please retry".into())
            }

            ServiceError::Repo(_) | ServiceError::Upstream(_) | ServiceError::Internal(_) => {
                HttpError::Internal(INTERNAL_MESSAGE.into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}
