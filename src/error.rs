/// Error types for Yatube
///
/// All handler failures flow through `AppError`. Responses are HTML pages
/// (this is a server-rendered site), except `LoginRequired` which redirects
/// to the login form the way the original auth gate did.
use actix_web::http::header::LOCATION;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for handler and service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cache operation failed
    #[error("Cache error: {0}")]
    Cache(String),

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// Form validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Protected route hit without a valid session
    #[error("Login required")]
    LoginRequired,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Path unauthenticated visitors are redirected to.
pub const LOGIN_URL: &str = "/auth/login/";

fn error_page(status: StatusCode, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>{code} {title}</title></head>\n\
         <body><h1>{code}</h1><p>{title}</p><p><a href=\"/\">Back to the feed</a></p></body>\n</html>",
        code = status.as_u16(),
        title = title,
    )
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::LoginRequired => StatusCode::FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::LoginRequired => HttpResponse::Found()
                .insert_header((LOCATION, LOGIN_URL))
                .finish(),
            AppError::NotFound(what) => {
                tracing::debug!("404: {}", what);
                HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(error_page(StatusCode::NOT_FOUND, "Page not found"))
            }
            AppError::Validation(msg) => HttpResponse::BadRequest()
                .content_type("text/html; charset=utf-8")
                .body(error_page(StatusCode::BAD_REQUEST, msg)),
            other => {
                tracing::error!("request failed: {}", other);
                HttpResponse::InternalServerError()
                    .content_type("text/html; charset=utf-8")
                    .body(error_page(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Something went wrong",
                    ))
            }
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Template(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Cache(err.to_string())
    }
}
