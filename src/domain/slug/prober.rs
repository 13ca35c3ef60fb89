// src/domain/slug/prober.rs
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    error::SlugError,
    value_objects::{EntityKind, OwnerRef, Slug},
};
use crate::domain::errors::DomainResult;

/// Read side of the persistence collaborator.
///
/// Implementations must back each [`EntityKind`] with a unique constraint so
/// that a commit racing another allocation fails instead of duplicating a slug.
#[async_trait]
pub trait SlugStore: Send + Sync {
    async fn exists_by_token(
        &self,
        kind: EntityKind,
        token: &Slug,
        exclude_owner: Option<OwnerRef>,
    ) -> DomainResult<bool>;
}

#[derive(Clone)]
pub struct CollisionProber {
    store: Arc<dyn SlugStore>,
    kind: EntityKind,
}

impl CollisionProber {
    pub fn new(store: Arc<dyn SlugStore>, kind: EntityKind) -> Self {
        Self { store, kind }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Whether a record other than `exclude_owner` already holds `token`.
    pub async fn is_taken(
        &self,
        token: &Slug,
        exclude_owner: Option<OwnerRef>,
    ) -> Result<bool, SlugError> {
        self.store
            .exists_by_token(self.kind, token, exclude_owner)
            .await
            .map_err(|err| SlugError::StoreUnavailable(err.to_string()))
    }
}
