/// Follow/unfollow actions from the profile page.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::AuthUser;
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::handlers::redirect;
use crate::services::{FollowOutcome, FollowService};

/// POST `/profile/{username}/follow/` — follow an author. Idempotent; a
/// self-follow creates nothing and bounces to the home feed instead of the
/// profile.
pub async fn profile_follow(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let author = user_repo::find_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;

    let service = FollowService::new((**pool).clone());
    match service.follow(user.id, author.id).await? {
        FollowOutcome::SelfFollow => Ok(redirect("/")),
        FollowOutcome::Created | FollowOutcome::AlreadyFollowing => {
            Ok(redirect(&format!("/profile/{}/", username)))
        }
    }
}

/// POST `/profile/{username}/unfollow/` — unfollow an author. A no-op when
/// there was no edge.
pub async fn profile_unfollow(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let author = user_repo::find_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;

    let service = FollowService::new((**pool).clone());
    service.unfollow(user.id, author.id).await?;

    Ok(redirect(&format!("/profile/{}/", username)))
}
