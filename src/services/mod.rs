//! Service layer between the HTTP routes and the remote API access layer.

use thiserror::Error;

use crate::api::errors::ApiError;

pub mod api;
pub mod auth;
pub mod contact;
pub mod main;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote rejected the stored credentials; the session is stale.
    #[error("not authenticated")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Client-detected validation failure; blocks submission, nothing was
    /// sent to the remote.
    #[error("{0}")]
    Form(String),

    #[error("api error: {0}")]
    Api(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::NotFound => ServiceError::NotFound,
            err => ServiceError::Api(err.to_string()),
        }
    }
}
