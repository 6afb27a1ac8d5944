/// Comment submission.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::AuthUser;
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::handlers::redirect;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

/// POST `/posts/{id}/comment/` — add a comment and bounce back to the post.
/// An empty body is dropped silently (same redirect, no row), mirroring the
/// always-redirect shape of the original flow.
pub async fn add_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    user: AuthUser,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let post = post_repo::find_post_view(&pool, *post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

    let text = form.text.trim();
    if !text.is_empty() {
        comment_repo::create_comment(&pool, post.id, user.id, text).await?;
    }

    Ok(redirect(&format!("/posts/{}/", post.id)))
}
