/// Signup, login and logout pages.
use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tera::Tera;
use validator::Validate;

use crate::auth::{password, MaybeUser, SessionKeys, SESSION_COOKIE};
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::handlers::{base_context, empty_string_as_none, redirect, render};
use crate::models::User;

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct SignupForm {
    #[validate(length(max = 150, message = "Username is too long"))]
    pub username: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

fn signup_page(tmpl: &Tera, user: &MaybeUser, form: &SignupForm, errors: &[String]) -> Result<HttpResponse> {
    let mut ctx = base_context(&user.0);
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    render(tmpl, "signup.html.tera", &ctx)
}

fn login_page(tmpl: &Tera, user: &MaybeUser, form: &LoginForm, errors: &[String]) -> Result<HttpResponse> {
    let mut ctx = base_context(&user.0);
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    render(tmpl, "login.html.tera", &ctx)
}

fn session_redirect(keys: &SessionKeys, user: &User, to: &str) -> Result<HttpResponse> {
    let token = keys.issue(user.id, &user.username)?;
    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish();

    Ok(HttpResponse::Found()
        .cookie(cookie)
        .insert_header((LOCATION, to.to_string()))
        .finish())
}

fn collect_errors(form: &SignupForm) -> Vec<String> {
    let mut errors = Vec::new();
    // The stored username is the trimmed value, so validate that one:
    // whitespace-only input must not create an account at `/profile//`.
    if form.username.trim().is_empty() {
        errors.push("Username is required".to_string());
    }
    if let Err(validation) = form.validate() {
        for field_errors in validation.field_errors().values() {
            for err in field_errors.iter() {
                if let Some(message) = &err.message {
                    errors.push(message.to_string());
                }
            }
        }
    }
    if form.password1 != form.password2 {
        errors.push("Passwords do not match".to_string());
    }
    errors
}

/// GET `/auth/signup/`
pub async fn signup_form(tmpl: web::Data<Tera>, user: MaybeUser) -> Result<HttpResponse> {
    signup_page(&tmpl, &user, &SignupForm::default(), &[])
}

/// POST `/auth/signup/` — create the account, sign the new user in, redirect
/// to the home feed. Validation failures re-render the form.
pub async fn signup(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    keys: web::Data<SessionKeys>,
    user: MaybeUser,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse> {
    let mut errors = collect_errors(&form);
    if !errors.is_empty() {
        return signup_page(&tmpl, &user, &form, &errors);
    }

    let password_hash = match password::hash_password(&form.password1) {
        Ok(hash) => hash,
        Err(AppError::Validation(msg)) => {
            errors.push(msg);
            return signup_page(&tmpl, &user, &form, &errors);
        }
        Err(other) => return Err(other),
    };

    let created = user_repo::create_user(
        &pool,
        form.username.trim(),
        &password_hash,
        form.first_name.as_deref(),
        form.last_name.as_deref(),
    )
    .await;

    let new_user = match created {
        Ok(new_user) => new_user,
        Err(e)
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false) =>
        {
            errors.push("Username is already taken".to_string());
            return signup_page(&tmpl, &user, &form, &errors);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(username = %new_user.username, "new user signed up");
    session_redirect(&keys, &new_user, "/")
}

/// GET `/auth/login/`
pub async fn login_form(tmpl: web::Data<Tera>, user: MaybeUser) -> Result<HttpResponse> {
    login_page(&tmpl, &user, &LoginForm::default(), &[])
}

/// POST `/auth/login/` — verify credentials and set the session cookie.
/// Unknown username and wrong password produce the same message.
pub async fn login(
    pool: web::Data<PgPool>,
    tmpl: web::Data<Tera>,
    keys: web::Data<SessionKeys>,
    user: MaybeUser,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let errors = vec!["Invalid username or password".to_string()];

    let Some(account) = user_repo::find_by_username(&pool, form.username.trim()).await? else {
        return login_page(&tmpl, &user, &form, &errors);
    };

    if password::verify_password(&form.password, &account.password_hash).is_err() {
        return login_page(&tmpl, &user, &form, &errors);
    }

    tracing::debug!(username = %account.username, "login");
    session_redirect(&keys, &account, "/")
}

/// GET `/auth/logout/` — drop the session cookie and go home.
pub async fn logout() -> Result<HttpResponse> {
    let cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::ZERO)
        .finish();

    let mut resp = redirect("/");
    resp.add_cookie(&cookie)
        .map_err(|e| AppError::Internal(format!("failed to clear session cookie: {}", e)))?;
    Ok(resp)
}
