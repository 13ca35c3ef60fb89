// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_snippet;
mod postgres_user;
mod slug_store;

pub use error::map_sqlx;
pub use postgres_snippet::{PostgresSnippetReadRepository, PostgresSnippetWriteRepository};
pub use postgres_user::PostgresUserRepository;
pub use slug_store::PostgresSlugStore;
