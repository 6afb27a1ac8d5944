/// Request extractors for the session cookie.
use actix_web::{web, FromRequest, HttpRequest};
use serde::Serialize;
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::session::SessionKeys;
use crate::error::AppError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// The signed-in viewer, extracted from a valid session cookie.
///
/// Using this extractor makes a route protected: without a valid session the
/// request is answered with a redirect to the login form.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let keys = req
        .app_data::<web::Data<SessionKeys>>()
        .ok_or_else(|| AppError::Internal("session keys not configured".to_string()))?;

    let cookie = req.cookie(SESSION_COOKIE).ok_or(AppError::LoginRequired)?;

    let claims = keys
        .verify(cookie.value())
        .map_err(|_| AppError::LoginRequired)?;

    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::LoginRequired)?;

    Ok(AuthUser {
        id,
        username: claims.username,
    })
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Optional viewer for public pages: `None` for anonymous visitors, never an
/// error.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeUser(authenticate(req).ok())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    fn keys() -> SessionKeys {
        SessionKeys::new(&AuthConfig {
            session_secret: "test-secret".to_string(),
            session_ttl_hours: 1,
        })
    }

    #[actix_web::test]
    async fn missing_cookie_is_login_required() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .to_http_request();

        let err = authenticate(&req).unwrap_err();
        assert!(matches!(err, AppError::LoginRequired));
    }

    #[actix_web::test]
    async fn valid_cookie_yields_user() {
        let session_keys = keys();
        let user_id = Uuid::new_v4();
        let token = session_keys.issue(user_id, "leo").unwrap();

        let req = TestRequest::default()
            .app_data(web::Data::new(session_keys))
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_http_request();

        let user = authenticate(&req).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "leo");
    }

    #[actix_web::test]
    async fn tampered_cookie_is_login_required() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .cookie(Cookie::new(SESSION_COOKIE, "garbage"))
            .to_http_request();

        assert!(matches!(
            authenticate(&req).unwrap_err(),
            AppError::LoginRequired
        ));
    }

    #[actix_web::test]
    async fn maybe_user_is_none_for_anonymous() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .to_http_request();

        let MaybeUser(user) = MaybeUser::from_request(&req, &mut actix_web::dev::Payload::None)
            .await
            .unwrap();
        assert!(user.is_none());
    }
}
