use crate::models::{Post, PostView};
use sqlx::{PgPool, Row};
use uuid::Uuid;

// Shared SELECT for the joined post shape templates render. Ordering is
// newest-first everywhere, with id as tie-breaker for equal timestamps.
const POST_VIEW_SELECT: &str = r#"
    SELECT p.id, p.text, p.image, p.pub_date, p.author_id,
           u.username AS author_username,
           p.group_id, g.title AS group_title, g.slug AS group_slug
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN groups g ON g.id = p.group_id
"#;

/// Create a new post. Returns the stored row.
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    group_id: Option<i64>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (text, author_id, group_id, image)
        VALUES ($1, $2, $3, $4)
        RETURNING id, text, author_id, group_id, image, pub_date
        "#,
    )
    .bind(text)
    .bind(author_id)
    .bind(group_id)
    .bind(image)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Replace a post's editable fields. Returns false when the post is gone.
pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    text: &str,
    group_id: Option<i64>,
    image: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        UPDATE posts
        SET text = $1, group_id = $2, image = COALESCE($3, image)
        WHERE id = $4
        "#,
    )
    .bind(text)
    .bind(group_id)
    .bind(image)
    .bind(post_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Find a post by ID, joined with author/group for rendering.
pub async fn find_post_view(pool: &PgPool, post_id: i64) -> Result<Option<PostView>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostView>(&format!("{POST_VIEW_SELECT} WHERE p.id = $1"))
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// One page of the global feed, newest first.
pub async fn home_page(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(&format!(
        "{POST_VIEW_SELECT} ORDER BY p.pub_date DESC, p.id DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Total post count.
pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// One page of a group's feed.
pub async fn group_page(
    pool: &PgPool,
    group_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(&format!(
        "{POST_VIEW_SELECT} WHERE p.group_id = $1 ORDER BY p.pub_date DESC, p.id DESC LIMIT $2 OFFSET $3"
    ))
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Post count for a group.
pub async fn count_by_group(pool: &PgPool, group_id: i64) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// One page of an author's feed.
pub async fn author_page(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(&format!(
        "{POST_VIEW_SELECT} WHERE p.author_id = $1 ORDER BY p.pub_date DESC, p.id DESC LIMIT $2 OFFSET $3"
    ))
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Post count for an author.
pub async fn count_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// One page of the follow feed: posts by authors the user follows,
/// newest first. Posts by anyone else never appear here.
pub async fn follow_page(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(&format!(
        r#"{POST_VIEW_SELECT}
        WHERE p.author_id IN (SELECT author_id FROM follows WHERE user_id = $1)
        ORDER BY p.pub_date DESC, p.id DESC
        LIMIT $2 OFFSET $3"#
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Post count for the follow feed.
pub async fn count_follow_feed(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM posts
        WHERE author_id IN (SELECT author_id FROM follows WHERE user_id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}
