//! Blog post documents and their JSON representations.
//!
//! # Design
//! `BlogPost` is the stored document: the store assigns `id` and `created`,
//! nothing else ever mutates it. `NewPost` is what callers hand to the store
//! (and what `POST /posts` accepts); it is checked by `NewPost::validate`
//! before anything is persisted. `PostView` is the shape the HTTP API returns,
//! with the author rendered as a single `"First Last"` string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of a post's author. Both parts are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `"First Last"`, the form exposed by the HTTP API.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Input for creating a post. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
}

/// A required field was empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{field}` must not be empty")]
pub struct ValidationError {
    pub field: &'static str,
}

fn validate_fields(author: &Author, title: &str, content: &str) -> Result<(), ValidationError> {
    let fields = [
        ("author.firstName", author.first_name.as_str()),
        ("author.lastName", author.last_name.as_str()),
        ("title", title),
        ("content", content),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError { field });
        }
    }
    Ok(())
}

impl NewPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.author, &self.title, &self.content)
    }
}

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    pub(crate) fn from_new(input: NewPost, created: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: input.author,
            title: input.title,
            content: input.content,
            created,
        }
    }

    /// Same required-field check as [`NewPost::validate`], for documents
    /// read back from disk.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.author, &self.title, &self.content)
    }

    pub fn view(&self) -> PostView {
        PostView::from(self)
    }
}

/// External representation returned by `GET /posts` and `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<&BlogPost> for PostView {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            author: post.author.full_name(),
            title: post.title.clone(),
            content: post.content.clone(),
            created: post.created,
        }
    }
}
