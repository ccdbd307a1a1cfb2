use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::bookmarks::repo_types::{Bookmark, BookmarkChanges, NewBookmark};
use crate::db::{Database, RepoError};

/// Bookmark persistence. Every lookup and mutation is scoped by owner.
#[async_trait]
pub trait BookmarkRepo: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Bookmark>, RepoError>;
    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, RepoError>;
    async fn create(&self, user_id: Uuid, new: &NewBookmark) -> Result<Bookmark, RepoError>;
    /// `Ok(None)` when the bookmark does not exist or belongs to someone else.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &BookmarkChanges,
    ) -> Result<Option<Bookmark>, RepoError>;
    /// Returns whether a row owned by `user_id` was removed.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepoError>;
}

#[derive(Clone)]
pub struct PgBookmarkRepo {
    db: PgPool,
}

impl PgBookmarkRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.pool().clone(),
        }
    }
}

#[async_trait]
impl BookmarkRepo for PgBookmarkRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Bookmark>, RepoError> {
        let rows = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, title, description, link, created_at, updated_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, RepoError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, title, description, link, created_at, updated_at
            FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn create(&self, user_id: Uuid, new: &NewBookmark) -> Result<Bookmark, RepoError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (user_id, title, description, link)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, description, link, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(&new.link)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &BookmarkChanges,
    ) -> Result<Option<Bookmark>, RepoError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            UPDATE bookmarks
               SET title       = COALESCE($3, title),
                   description = COALESCE($4, description),
                   link        = COALESCE($5, link),
                   updated_at  = now()
             WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, link, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.link.as_deref())
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryBookmarkRepo;

#[cfg(test)]
mod memory {
    use async_trait::async_trait;
    use time::OffsetDateTime;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::BookmarkRepo;
    use crate::bookmarks::repo_types::{Bookmark, BookmarkChanges, NewBookmark};
    use crate::db::RepoError;

    /// Keeps insertion order so listing matches the Postgres `created_at` ordering.
    #[derive(Default)]
    pub(crate) struct MemoryBookmarkRepo {
        rows: RwLock<Vec<Bookmark>>,
    }

    #[async_trait]
    impl BookmarkRepo for MemoryBookmarkRepo {
        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Bookmark>, RepoError> {
            let rows = self.rows.read().await;
            Ok(rows.iter().filter(|b| b.user_id == user_id).cloned().collect())
        }

        async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, RepoError> {
            let rows = self.rows.read().await;
            Ok(rows
                .iter()
                .find(|b| b.id == id && b.user_id == user_id)
                .cloned())
        }

        async fn create(&self, user_id: Uuid, new: &NewBookmark) -> Result<Bookmark, RepoError> {
            let now = OffsetDateTime::now_utc();
            let row = Bookmark {
                id: Uuid::new_v4(),
                user_id,
                title: new.title.clone(),
                description: new.description.clone(),
                link: new.link.clone(),
                created_at: now,
                updated_at: now,
            };
            self.rows.write().await.push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            user_id: Uuid,
            id: Uuid,
            changes: &BookmarkChanges,
        ) -> Result<Option<Bookmark>, RepoError> {
            let mut rows = self.rows.write().await;
            let Some(row) = rows.iter_mut().find(|b| b.id == id && b.user_id == user_id) else {
                return Ok(None);
            };
            if let Some(title) = &changes.title {
                row.title = title.clone();
            }
            if let Some(description) = &changes.description {
                row.description = Some(description.clone());
            }
            if let Some(link) = &changes.link {
                row.link = link.clone();
            }
            row.updated_at = OffsetDateTime::now_utc();
            Ok(Some(row.clone()))
        }

        async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepoError> {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|b| !(b.id == id && b.user_id == user_id));
            Ok(rows.len() < before)
        }
    }
}
