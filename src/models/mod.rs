/// Data structures for users, groups, posts, comments and follows.
///
/// Row structs map 1:1 onto tables; the `*View` structs are the joined shapes
/// handed to templates (a post always renders with its author's username and,
/// when filed, its group).
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Authentication principal.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id hash, never serialized into a template context.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A named forum/category posts can be filed under.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A post row as stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub author_id: Uuid,
    pub group_id: Option<i64>,
    /// Stored path/URL under the media mount; upload plumbing lives outside
    /// this service.
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
}

/// A post joined with its author and optional group, ready for rendering.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostView {
    pub id: i64,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
}

/// A comment joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
    pub author_username: String,
}
