use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use tracing::instrument;

use super::dto::EditUserRequest;
use super::repo_types::User;
use super::services;
use crate::{auth::AuthUser, error::AppResult, state::AppState, validation::ValidatedJson};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/users", patch(edit_user))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<User>> {
    Ok(Json(services::get_current(&state, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn edit_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(payload): ValidatedJson<EditUserRequest>,
) -> AppResult<Json<User>> {
    Ok(Json(services::edit(&state, user_id, payload.into()).await?))
}
