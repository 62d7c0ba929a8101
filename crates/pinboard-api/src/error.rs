use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pinboard_store::StoreError;
use pinboard_types::api::ErrorBody;
use thiserror::Error;
use tracing::error;

/// Every way a request can fail. The `Display` text is what the client sees
/// in the `msg` field of the error body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing Authorization Header")]
    MissingToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Message content must be a non-empty string")]
    InvalidMessage,

    #[error("Invalid pagination parameters")]
    InvalidQuery,

    #[error("{0}")]
    Storage(StoreError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredentials | Self::InvalidMessage | Self::InvalidQuery => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::MissingToken | Self::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidToken(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCredentials => Self::InvalidCredentials,
            StoreError::InvalidInput(_) => Self::InvalidMessage,
            other => Self::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorBody { msg: self.to_string() })).into_response()
    }
}

/// Await a blocking store call, folding join failures into a 500.
pub async fn join_blocking<T>(
    handle: tokio::task::JoinHandle<Result<T, StoreError>>,
) -> Result<T, ApiError> {
    handle
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.to_string())
        })?
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_facing_kinds() {
        assert!(matches!(
            ApiError::from(StoreError::InvalidCredentials),
            ApiError::InvalidCredentials
        ));
        assert!(matches!(
            ApiError::from(StoreError::InvalidInput("empty")),
            ApiError::InvalidMessage
        ));

        let io = ApiError::from(StoreError::LockPoisoned);
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(io.to_string(), "Store lock poisoned");
    }

    #[test]
    fn token_failures_split_between_401_and_422() {
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::ExpiredToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidToken("bad".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
