use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{AuthRequest, TokenResponse};
use super::jwt::JwtKeys;
use super::services;
use crate::{
    error::AppResult, state::AppState, users::repo_types::User, validation::ValidatedJson,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AuthRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = services::signup(&state, &payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AuthRequest>,
) -> AppResult<Json<TokenResponse>> {
    let access_token = services::login(&state, &payload.email, &payload.password).await?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: JwtKeys::from_ref(&state).ttl.as_secs(),
    }))
}
