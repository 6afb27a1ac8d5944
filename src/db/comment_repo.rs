use crate::models::CommentView;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new comment on a post. Returns the new comment id.
pub async fn create_comment(
    pool: &PgPool,
    post_id: i64,
    author_id: Uuid,
    text: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO comments (post_id, author_id, text)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("id"))
}

/// All comments on a post, oldest first, joined with the commenter's
/// username. Comments are public: visibility is not gated on a session.
pub async fn list_for_post(pool: &PgPool, post_id: i64) -> Result<Vec<CommentView>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentView>(
        r#"
        SELECT c.id, c.post_id, c.text, c.created, u.username AS author_username
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created ASC, c.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
