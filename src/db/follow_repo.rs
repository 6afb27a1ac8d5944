use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Idempotent follow insert; returns true if a new edge was created.
/// A duplicate follow hits the (user_id, author_id) primary key and is a
/// no-op.
pub async fn create_follow(
    pool: &PgPool,
    user_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        INSERT INTO follows (user_id, author_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, author_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(author_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Idempotent unfollow; returns true if an edge was removed.
pub async fn delete_follow(
    pool: &PgPool,
    user_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE user_id = $1 AND author_id = $2
        "#,
    )
    .bind(user_id)
    .bind(author_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Does `user_id` follow `author_id`?
pub async fn is_following(
    pool: &PgPool,
    user_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2
        ) AS following
        "#,
    )
    .bind(user_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>("following"))
}

/// Number of followers an author has.
pub async fn follower_count(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM follows WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Number of authors a user follows.
pub async fn following_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM follows WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
