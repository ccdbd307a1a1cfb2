use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{Database, RepoError};
use crate::users::repo_types::{User, UserChanges};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a new user; `RepoError::Conflict` if the email is taken.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, RepoError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    /// Apply `changes` to the user; `Ok(None)` when no such user exists.
    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.pool().clone(),
        }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET email      = COALESCE($2, email),
                   first_name = COALESCE($3, first_name),
                   last_name  = COALESCE($4, last_name),
                   updated_at = now()
             WHERE id = $1
            RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryUserRepo;

#[cfg(test)]
mod memory {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use time::OffsetDateTime;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::UserRepo;
    use crate::db::RepoError;
    use crate::users::repo_types::{User, UserChanges};

    /// In-process stand-in for `PgUserRepo` with the same uniqueness rule on email.
    #[derive(Default)]
    pub(crate) struct MemoryUserRepo {
        users: RwLock<HashMap<Uuid, User>>,
    }

    #[async_trait]
    impl UserRepo for MemoryUserRepo {
        async fn create(&self, email: &str, password_hash: &str) -> Result<User, RepoError> {
            let mut users = self.users.write().await;
            if users.values().any(|u| u.email == email) {
                return Err(RepoError::Conflict);
            }
            let now = OffsetDateTime::now_utc();
            let user = User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                first_name: None,
                last_name: None,
                created_at: now,
                updated_at: now,
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.users.read().await.get(&id).cloned())
        }

        async fn update(
            &self,
            id: Uuid,
            changes: &UserChanges,
        ) -> Result<Option<User>, RepoError> {
            let mut users = self.users.write().await;
            if let Some(email) = &changes.email {
                if users.values().any(|u| u.id != id && &u.email == email) {
                    return Err(RepoError::Conflict);
                }
            }
            let Some(user) = users.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(email) = &changes.email {
                user.email = email.clone();
            }
            if let Some(first_name) = &changes.first_name {
                user.first_name = Some(first_name.clone());
            }
            if let Some(last_name) = &changes.last_name {
                user.last_name = Some(last_name.clone());
            }
            user.updated_at = OffsetDateTime::now_utc();
            Ok(Some(user.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_repo_rejects_duplicate_email() {
        let repo = MemoryUserRepo::default();
        repo.create("a@example.com", "hash").await.unwrap();
        let err = repo.create("a@example.com", "hash").await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict));
    }

    #[tokio::test]
    async fn memory_repo_update_keeps_unset_fields() {
        let repo = MemoryUserRepo::default();
        let user = repo.create("a@example.com", "hash").await.unwrap();
        let changes = UserChanges {
            first_name: Some("Ada".into()),
            ..Default::default()
        };

        let updated = repo.update(user.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.email, "a@example.com");
        assert_eq!(updated.first_name.as_deref(), Some("Ada"));
        assert_eq!(updated.last_name, None);
    }

    #[cfg(feature = "live-db-tests")]
    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn pg_repo_create_find_update() {
        let db = crate::db::live::test_database().await;
        let repo = PgUserRepo::new(&db);

        let user = repo.create("live@example.com", "hash").await.expect("create");
        let dup = repo.create("live@example.com", "hash").await.unwrap_err();
        assert!(matches!(dup, RepoError::Conflict));

        let found = repo
            .find_by_email("live@example.com")
            .await
            .expect("find_by_email")
            .expect("user exists");
        assert_eq!(found.id, user.id);

        let changes = UserChanges {
            last_name: Some("Lovelace".into()),
            ..Default::default()
        };
        let updated = repo
            .update(user.id, &changes)
            .await
            .expect("update")
            .expect("user exists");
        assert_eq!(updated.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(updated.email, "live@example.com");
        assert!(repo.update(Uuid::new_v4(), &changes).await.unwrap().is_none());

        db.close().await;
    }
}
