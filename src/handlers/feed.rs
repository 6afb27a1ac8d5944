/// Feed pages: home, group, profile, follow.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use tera::Tera;

use crate::auth::{AuthUser, MaybeUser};
use crate::cache::PageCache;
use crate::db::{follow_repo, group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::handlers::{base_context, html_response, render};
use crate::pagination::{paginate, PageQuery, POSTS_PER_PAGE};

/// GET `/` — the global feed, served through the page cache.
///
/// The page number is resolved against the current post count before the
/// cache lookup so that a clamped request and its canonical page share an
/// entry. Cache read failures fall back to a fresh render.
pub async fn index(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    cache: web::Data<PageCache>,
    query: web::Query<PageQuery>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let total = post_repo::count_all(&pool).await?;
    let page = paginate(total, POSTS_PER_PAGE, query.page);

    if let Ok(Some(html)) = cache.read_index(page.number).await {
        return Ok(html_response(html));
    }

    let posts = post_repo::home_page(&pool, page.limit(), page.offset()).await?;

    let mut ctx = base_context(&user.0);
    ctx.insert("page_obj", &page);
    ctx.insert("posts", &posts);
    let body = tmpl.render("index.html.tera", &ctx)?;

    // Best effort: a cache outage must not take the home page down.
    if cache.write_index(page.number, &body).await.is_err() {
        tracing::warn!("serving uncached home page, cache write failed");
    }

    Ok(html_response(body))
}

/// GET `/group/{slug}/` — posts filed under one group.
pub async fn group_list(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let group = group_repo::find_by_slug(&pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group {}", slug)))?;

    let total = post_repo::count_by_group(&pool, group.id).await?;
    let page = paginate(total, POSTS_PER_PAGE, query.page);
    let posts = post_repo::group_page(&pool, group.id, page.limit(), page.offset()).await?;

    let mut ctx = base_context(&user.0);
    ctx.insert("group", &group);
    ctx.insert("page_obj", &page);
    ctx.insert("posts", &posts);
    render(&tmpl, "group_list.html.tera", &ctx)
}

/// GET `/profile/{username}/` — one author's feed, with follower counters and
/// the viewer's "following" flag.
pub async fn profile(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let author = user_repo::find_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;

    let total = post_repo::count_by_author(&pool, author.id).await?;
    let page = paginate(total, POSTS_PER_PAGE, query.page);
    let posts = post_repo::author_page(&pool, author.id, page.limit(), page.offset()).await?;

    let following = match &user.0 {
        Some(viewer) if viewer.id != author.id => {
            follow_repo::is_following(&pool, viewer.id, author.id).await?
        }
        _ => false,
    };
    let followers = follow_repo::follower_count(&pool, author.id).await?;
    let follows = follow_repo::following_count(&pool, author.id).await?;

    let mut ctx = base_context(&user.0);
    ctx.insert("author", &author);
    ctx.insert("page_obj", &page);
    ctx.insert("posts", &posts);
    ctx.insert("count", &total);
    ctx.insert("following", &following);
    ctx.insert("followers", &followers);
    ctx.insert("follows", &follows);
    render(&tmpl, "profile.html.tera", &ctx)
}

/// GET `/follow/` — posts by authors the signed-in user follows.
pub async fn follow_index(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    query: web::Query<PageQuery>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let total = post_repo::count_follow_feed(&pool, user.id).await?;
    let page = paginate(total, POSTS_PER_PAGE, query.page);
    let posts = post_repo::follow_page(&pool, user.id, page.limit(), page.offset()).await?;

    let mut ctx = base_context(&Some(user));
    ctx.insert("page_obj", &page);
    ctx.insert("posts", &posts);
    render(&tmpl, "follow.html.tera", &ctx)
}
