use axum::extract::FromRef;
use tracing::{info, warn};

use super::jwt::JwtKeys;
use super::password::{hash_password_blocking, verify_password_blocking};
use crate::db::RepoError;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::users::repo_types::User;

const WRONG_CREDENTIALS: &str = "Wrong email or password";

/// Creates a user with an Argon2 hash of `password`.
pub async fn signup(state: &AppState, email: &str, password: &str) -> AppResult<User> {
    let hash = hash_password_blocking(password.to_string()).await?;

    match state.users.create(email, &hash).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "user registered");
            Ok(user)
        }
        Err(RepoError::Conflict) => {
            warn!(email = %email, "email already registered");
            Err(AppError::forbidden("Email already exists"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks credentials and issues a signed access token.
pub async fn login(state: &AppState, email: &str, password: &str) -> AppResult<String> {
    let Some(user) = state.users.find_by_email(email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::forbidden(WRONG_CREDENTIALS));
    };

    let ok = verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::forbidden(WRONG_CREDENTIALS));
    }

    let token = JwtKeys::from_ref(state).sign(user.id, &user.email)?;
    info!(user_id = %user.id, "user logged in");
    Ok(token)
}
