//! Snippet sharing backend: human-readable slug allocation over a
//! layered axum/sqlx service.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
