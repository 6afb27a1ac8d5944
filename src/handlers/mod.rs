/// HTTP handlers, one module per page family.
///
/// Handlers are read-modify-render cycles: load rows, resolve the page,
/// build a Tera context, render. Mutations answer with a redirect the way
/// the browser form flow expects.
pub mod auth;
pub mod comments;
pub mod feed;
pub mod follow;
pub mod posts;

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use tera::{Context, Tera};

use crate::auth::AuthUser;
use crate::error::Result;

/// Wire up every route. The 404 default service is attached in `main` at the
/// App level.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(feed::index)))
        .service(web::resource("/follow/").route(web::get().to(feed::follow_index)))
        .service(web::resource("/group/{slug}/").route(web::get().to(feed::group_list)))
        .service(web::resource("/profile/{username}/").route(web::get().to(feed::profile)))
        .service(
            web::resource("/profile/{username}/follow/")
                .route(web::post().to(follow::profile_follow)),
        )
        .service(
            web::resource("/profile/{username}/unfollow/")
                .route(web::post().to(follow::profile_unfollow)),
        )
        .service(
            web::resource("/create/")
                .route(web::get().to(posts::post_create_form))
                .route(web::post().to(posts::post_create)),
        )
        .service(web::resource("/posts/{id}/").route(web::get().to(posts::post_detail)))
        .service(
            web::resource("/posts/{id}/edit/")
                .route(web::get().to(posts::post_edit_form))
                .route(web::post().to(posts::post_edit)),
        )
        .service(
            web::resource("/posts/{id}/comment/").route(web::post().to(comments::add_comment)),
        )
        .service(
            web::scope("/auth")
                .service(
                    web::resource("/signup/")
                        .route(web::get().to(auth::signup_form))
                        .route(web::post().to(auth::signup)),
                )
                .service(
                    web::resource("/login/")
                        .route(web::get().to(auth::login_form))
                        .route(web::post().to(auth::login)),
                )
                .service(web::resource("/logout/").route(web::get().to(auth::logout))),
        );
}

/// Default service: anything unrouted renders the 404 page.
pub async fn not_found() -> Result<HttpResponse> {
    Err(crate::error::AppError::NotFound("no such route".to_string()))
}

/// Fresh template context carrying the (maybe absent) signed-in viewer.
pub(crate) fn base_context(user: &Option<AuthUser>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("user", user);
    ctx
}

pub(crate) fn render(tmpl: &Tera, name: &str, ctx: &Context) -> Result<HttpResponse> {
    let body = tmpl.render(name, ctx)?;
    Ok(html_response(body))
}

pub(crate) fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// 302 the way the browser form flow expects.
pub(crate) fn redirect(path: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, path))
        .finish()
}

/// HTML forms submit unset optional fields as empty strings; map those to
/// `None` instead of a parse error.
pub(crate) fn empty_string_as_none<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        group: Option<i64>,
    }

    #[test]
    fn empty_select_deserializes_to_none() {
        let form: Form = serde_urlencoded::from_str("group=").unwrap();
        assert!(form.group.is_none());

        let form: Form = serde_urlencoded::from_str("").unwrap();
        assert!(form.group.is_none());

        let form: Form = serde_urlencoded::from_str("group=7").unwrap();
        assert_eq!(form.group, Some(7));
    }
}
