use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::session::SessionError;

/// Extract and validate the bearer token, then hand the decoded claims to
/// the handler as a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ApiError::MissingToken)?;

    let claims = state
        .sessions
        .verify(bearer.token())
        .map_err(|e| match e {
            SessionError::Expired => ApiError::ExpiredToken,
            other => ApiError::InvalidToken(other.to_string()),
        })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
