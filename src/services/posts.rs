use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::models::Post;

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post for an author. The home-feed cache is deliberately left
    /// alone: the new post becomes visible there when the window expires.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        text: &str,
        group_id: Option<i64>,
        image: Option<&str>,
    ) -> Result<Post> {
        let post = post_repo::create_post(&self.pool, author_id, text, group_id, image).await?;
        info!(post_id = post.id, %author_id, "post created");
        Ok(post)
    }

    /// Update a post's text/group/image.
    pub async fn edit_post(
        &self,
        post_id: i64,
        text: &str,
        group_id: Option<i64>,
        image: Option<&str>,
    ) -> Result<()> {
        let updated = post_repo::update_post(&self.pool, post_id, text, group_id, image).await?;
        if !updated {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }
        info!(post_id, "post edited");
        Ok(())
    }
}
