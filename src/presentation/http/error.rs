// src/presentation/http/error.rs
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::{errors::DomainError, slug::SlugError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let status = status_for(&err);
        let message = match err {
            ApplicationError::Validation(msg)
            | ApplicationError::NotFound(msg)
            | ApplicationError::Conflict(msg)
            | ApplicationError::Unauthorized(msg)
            | ApplicationError::Forbidden(msg)
            | ApplicationError::Infrastructure(msg) => msg,
            ApplicationError::Domain(err) => err.to_string(),
            ApplicationError::Slug(err) => err.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        }
        Self::new(status, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }
}

fn status_for(err: &ApplicationError) -> StatusCode {
    match err {
        ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
        ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::Conflict(_) => StatusCode::CONFLICT,
        ApplicationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ApplicationError::Forbidden(_) => StatusCode::FORBIDDEN,
        ApplicationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ApplicationError::Domain(domain) => match domain {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) | DomainError::SlugTaken(_) => StatusCode::CONFLICT,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        ApplicationError::Slug(slug) => match slug {
            SlugError::InvalidLabel { .. } => StatusCode::BAD_REQUEST,
            SlugError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            SlugError::AllocationExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
