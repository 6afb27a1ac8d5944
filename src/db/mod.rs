/// Database access layer
///
/// One repository module per aggregate. Repositories are plain async
/// functions over a `PgPool` returning `sqlx::Error`; mapping into `AppError`
/// happens in the handlers/services.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;
