use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;

use pinboard_types::api::{Claims, CreateMessageRequest};
use pinboard_types::models::Action;

use crate::auth::AppState;
use crate::error::{ApiError, join_blocking};
use crate::gate::authorize;

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    10
}

/// GET /api/messages?page=&per_page=
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    query: Result<Query<MessageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&claims, Action::ReadMessages)?;
    let Query(query) = query.map_err(|_| ApiError::InvalidQuery)?;

    let st = state.clone();
    let page = join_blocking(tokio::task::spawn_blocking(move || {
        st.store.list(query.page, query.per_page)
    }))
    .await?;

    Ok(Json(page))
}

/// POST /api/messages — admin only.
pub async fn create_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&claims, Action::PostMessage)?;

    let Json(req) = body.map_err(|_| ApiError::InvalidMessage)?;
    let text = match req.message {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => return Err(ApiError::InvalidMessage),
    };

    let st = state.clone();
    let author_id = claims.id;
    let message =
        join_blocking(tokio::task::spawn_blocking(move || st.store.append(author_id, &text)))
            .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
