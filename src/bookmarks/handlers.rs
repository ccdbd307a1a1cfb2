use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{CreateBookmarkRequest, EditBookmarkRequest};
use super::repo_types::Bookmark;
use super::services;
use crate::{
    auth::AuthUser,
    error::AppResult,
    state::AppState,
    validation::{ValidatedJson, ValidatedPath},
};

pub fn bookmark_routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/:id",
            get(get_bookmark).patch(edit_bookmark).delete(delete_bookmark),
        )
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<Bookmark>>> {
    Ok(Json(services::list(&state, user_id).await?))
}

#[instrument(skip(state))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<Bookmark>> {
    Ok(Json(services::get_by_id(&state, user_id, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateBookmarkRequest>,
) -> AppResult<(StatusCode, Json<Bookmark>)> {
    let bookmark = services::create(&state, user_id, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[instrument(skip(state, payload))]
pub async fn edit_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<EditBookmarkRequest>,
) -> AppResult<Json<Bookmark>> {
    Ok(Json(services::update(&state, user_id, id, payload.into()).await?))
}

#[instrument(skip(state))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<StatusCode> {
    services::delete(&state, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
