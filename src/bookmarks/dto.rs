use serde::Deserialize;

use crate::bookmarks::repo_types::{BookmarkChanges, NewBookmark};
use crate::validation::{null_as_empty, Validate, Violations};

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
}

impl Validate for CreateBookmarkRequest {
    fn validate(&self, v: &mut Violations) {
        v.not_empty("title", &self.title).not_empty("link", &self.link);
    }
}

impl From<CreateBookmarkRequest> for NewBookmark {
    fn from(req: CreateBookmarkRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            link: req.link,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditBookmarkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl Validate for EditBookmarkRequest {
    fn validate(&self, v: &mut Violations) {
        if let Some(title) = &self.title {
            v.not_empty("title", title);
        }
        if let Some(link) = &self.link {
            v.not_empty("link", link);
        }
    }
}

impl From<EditBookmarkRequest> for BookmarkChanges {
    fn from(req: EditBookmarkRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            link: req.link,
        }
    }
}
