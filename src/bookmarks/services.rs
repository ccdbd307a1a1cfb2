use tracing::info;
use uuid::Uuid;

use crate::bookmarks::repo_types::{Bookmark, BookmarkChanges, NewBookmark};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const NOT_FOUND: &str = "Bookmark not found";

pub async fn list(state: &AppState, user_id: Uuid) -> AppResult<Vec<Bookmark>> {
    Ok(state.bookmarks.list_by_user(user_id).await?)
}

pub async fn get_by_id(state: &AppState, user_id: Uuid, bookmark_id: Uuid) -> AppResult<Bookmark> {
    state
        .bookmarks
        .find(user_id, bookmark_id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

pub async fn create(state: &AppState, user_id: Uuid, new: NewBookmark) -> AppResult<Bookmark> {
    let bookmark = state.bookmarks.create(user_id, &new).await?;
    info!(user_id = %user_id, bookmark_id = %bookmark.id, "bookmark created");
    Ok(bookmark)
}

/// Bookmarks owned by someone else are reported as missing, never as forbidden.
pub async fn update(
    state: &AppState,
    user_id: Uuid,
    bookmark_id: Uuid,
    changes: BookmarkChanges,
) -> AppResult<Bookmark> {
    let bookmark = state
        .bookmarks
        .update(user_id, bookmark_id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    info!(user_id = %user_id, bookmark_id = %bookmark.id, "bookmark updated");
    Ok(bookmark)
}

pub async fn delete(state: &AppState, user_id: Uuid, bookmark_id: Uuid) -> AppResult<()> {
    if !state.bookmarks.delete(user_id, bookmark_id).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!(user_id = %user_id, bookmark_id = %bookmark_id, "bookmark deleted");
    Ok(())
}
