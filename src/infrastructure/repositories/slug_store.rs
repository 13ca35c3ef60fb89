// src/infrastructure/repositories/slug_store.rs
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{EntityKind, OwnerRef, Slug, SlugStore};
use async_trait::async_trait;
use sqlx::PgPool;

/// Probes the unique columns backing each entity kind.
#[derive(Clone)]
pub struct PostgresSlugStore {
    pool: PgPool,
}

impl PostgresSlugStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn probe_sql(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Snippet => {
                "SELECT EXISTS (SELECT 1 FROM snippets WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))"
            }
            EntityKind::User => {
                "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND ($2::BIGINT IS NULL OR id <> $2))"
            }
        }
    }
}

#[async_trait]
impl SlugStore for PostgresSlugStore {
    async fn exists_by_token(
        &self,
        kind: EntityKind,
        token: &Slug,
        exclude_owner: Option<OwnerRef>,
    ) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(Self::probe_sql(kind))
            .bind(token.as_str())
            .bind(exclude_owner.map(i64::from))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
