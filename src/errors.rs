use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("invalid storage id '{0}', must be a path segment without spaces")]
    InvalidIdentifier(String),
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
    #[error("file '{0}' not found")]
    NotFound(String),
    #[error("invalid JSON content: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let status = match self {
            StorageError::NotFound(_) => StatusCode::NOT_FOUND,
            StorageError::InvalidIdentifier(_)
            | StorageError::PreconditionFailed(_)
            | StorageError::Deserialization(_) => StatusCode::BAD_REQUEST,
            StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
