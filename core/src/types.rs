//! Wire DTOs for the blog post API.
//!
//! These mirror the server's JSON shapes but are declared here so the client
//! does not depend on the server crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as returned by `GET /posts` and `POST /posts`. `author` is the
/// server-rendered `"First Last"` string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}

/// Request payload for `POST /posts`. All fields are required by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePost {
    pub author: AuthorName,
    pub title: String,
    pub content: String,
}
