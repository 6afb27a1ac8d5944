/// Post pages: detail, create, edit.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tera::Tera;

use crate::auth::{AuthUser, MaybeUser};
use crate::db::{comment_repo, follow_repo, group_repo, post_repo};
use crate::error::{AppError, Result};
use crate::handlers::{base_context, empty_string_as_none, redirect, render};
use crate::services::PostService;

/// Shared create/edit form payload. The group select and the image field
/// submit empty strings when unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostForm {
    pub text: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub group: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image: Option<String>,
}

impl PostForm {
    fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.text.trim().is_empty() {
            errors.push("Post text cannot be empty".to_string());
        }
        errors
    }
}

/// GET `/posts/{id}/` — post detail with comments and the comment form.
/// Comments are readable by anyone; only the form is gated (in the POST
/// handler).
pub async fn post_detail(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    post_id: web::Path<i64>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let post = post_repo::find_post_view(&pool, *post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

    let comments = comment_repo::list_for_post(&pool, post.id).await?;
    let count = post_repo::count_by_author(&pool, post.author_id).await?;

    let following = match &user.0 {
        Some(viewer) if viewer.id != post.author_id => {
            follow_repo::is_following(&pool, viewer.id, post.author_id).await?
        }
        _ => false,
    };

    let mut ctx = base_context(&user.0);
    ctx.insert("post", &post);
    ctx.insert("comments", &comments);
    ctx.insert("count", &count);
    ctx.insert("following", &following);
    render(&tmpl, "post_detail.html.tera", &ctx)
}

async fn render_post_form(
    pool: &PgPool,
    tmpl: &Tera,
    user: &AuthUser,
    form: &PostForm,
    errors: &[String],
    is_edit: bool,
    post_id: Option<i64>,
) -> Result<HttpResponse> {
    let groups = group_repo::list_groups(pool).await?;

    let mut ctx = base_context(&Some(user.clone()));
    ctx.insert("form", form);
    ctx.insert("groups", &groups);
    ctx.insert("errors", errors);
    ctx.insert("is_edit", &is_edit);
    ctx.insert("post_id", &post_id);
    render(tmpl, "create_post.html.tera", &ctx)
}

/// GET `/create/` — blank post form.
pub async fn post_create_form(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    user: AuthUser,
) -> Result<HttpResponse> {
    render_post_form(&pool, &tmpl, &user, &PostForm::default(), &[], false, None).await
}

/// POST `/create/` — create a post, then redirect to the author's profile.
/// Invalid input re-renders the form with messages.
pub async fn post_create(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    user: AuthUser,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let errors = form.validation_errors();
    if !errors.is_empty() {
        return render_post_form(&pool, &tmpl, &user, &form, &errors, false, None).await;
    }

    let service = PostService::new((**pool).clone());
    service
        .create_post(
            user.id,
            form.text.trim(),
            form.group,
            form.image.as_deref(),
        )
        .await?;

    Ok(redirect(&format!("/profile/{}/", user.username)))
}

/// GET `/posts/{id}/edit/` — form prefilled with the stored post.
pub async fn post_edit_form(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    post_id: web::Path<i64>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let post = post_repo::find_post_view(&pool, *post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

    let form = PostForm {
        text: post.text.clone(),
        group: post.group_id,
        image: post.image.clone(),
    };
    render_post_form(&pool, &tmpl, &user, &form, &[], true, Some(post.id)).await
}

/// POST `/posts/{id}/edit/` — update, then redirect to the post detail page.
// TODO: restrict editing to the post's author. Today any signed-in user can
// edit any post, matching the behavior this system was migrated from.
pub async fn post_edit(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    post_id: web::Path<i64>,
    user: AuthUser,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let errors = form.validation_errors();
    if !errors.is_empty() {
        return render_post_form(&pool, &tmpl, &user, &form, &errors, true, Some(*post_id)).await;
    }

    let service = PostService::new((**pool).clone());
    service
        .edit_post(*post_id, form.text.trim(), form.group, form.image.as_deref())
        .await?;

    Ok(redirect(&format!("/posts/{}/", post_id)))
}
