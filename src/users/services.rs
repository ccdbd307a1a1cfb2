use tracing::{info, warn};
use uuid::Uuid;

use crate::db::RepoError;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::users::repo_types::{User, UserChanges};

/// Profile of the authenticated user; a token whose user is gone is treated as unauthenticated.
pub async fn get_current(state: &AppState, user_id: Uuid) -> AppResult<User> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "token for unknown user");
            AppError::unauthorized("User not found")
        })
}

pub async fn edit(state: &AppState, user_id: Uuid, changes: UserChanges) -> AppResult<User> {
    match state.users.update(user_id, &changes).await {
        Ok(Some(user)) => {
            info!(user_id = %user.id, "user profile updated");
            Ok(user)
        }
        Ok(None) => Err(AppError::unauthorized("User not found")),
        Err(RepoError::Conflict) => Err(AppError::forbidden("Email already exists")),
        Err(e) => Err(e.into()),
    }
}
