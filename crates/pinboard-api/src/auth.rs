use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{error, info};

use pinboard_store::Store;
use pinboard_types::api::{LoginRequest, LoginResponse};

use crate::error::{ApiError, join_blocking};
use crate::session::SessionIssuer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub sessions: SessionIssuer,
}

/// POST /api/login — exchange a username/password for a session token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body.map_err(|_| ApiError::MissingCredentials)?;

    let (username, password) = match (req.username, req.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => return Err(ApiError::MissingCredentials),
    };

    // Argon2 verification is CPU-bound; keep it off the async workers.
    let st = state.clone();
    let identity =
        join_blocking(tokio::task::spawn_blocking(move || st.store.verify(&username, &password)))
            .await?;

    let token = state.sessions.issue(&identity).map_err(|e| {
        error!("Token issuance failed: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    info!("User {} ({}) logged in", identity.username, identity.role);
    Ok(Json(LoginResponse {
        token,
        user: identity,
    }))
}
