use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

/// Partial update; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}
