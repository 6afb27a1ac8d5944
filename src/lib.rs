//! Yatube library
//!
//! A server-rendered blogging platform: users publish posts, optionally filed
//! under a group, comment on each other's posts, and follow authors to build
//! a personal feed. Handlers are thin read-modify-render cycles over
//! PostgreSQL; the home feed is additionally served through a short-lived
//! Redis page cache.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers (one file per page family)
//! - `models`: row and template-view structs
//! - `services`: business logic over the repositories
//! - `db`: repository functions (sqlx)
//! - `cache`: rendered-page caching for the home feed
//! - `auth`: password hashing, session tokens, request extractors
//! - `pagination`: feed page math
//! - `error`: error types and HTML error responses
//! - `config`: environment configuration
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
