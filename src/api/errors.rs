use thiserror::Error;

/// Failures surfaced by the remote Contacts API access layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401-class response; the session is treated as not authenticated.
    #[error("not authenticated")]
    Unauthorized,

    #[error("entity not found")]
    NotFound,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("api returned status {status}: {message}")]
    Status { status: u16, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// True when the failure means the stored credentials are no longer
    /// valid and the session should be cleared.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
