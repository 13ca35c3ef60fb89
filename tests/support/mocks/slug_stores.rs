// tests/support/mocks/slug_stores.rs
use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use snipshare::domain::errors::{DomainError, DomainResult};
use snipshare::domain::slug::{EntityKind, OwnerRef, Slug, SlugStore};

/// Reports chosen tokens as free a fixed number of times even though they
/// are stored, so the following commit loses the race.
pub struct RacingSlugStore {
    inner: Arc<dyn SlugStore>,
    blind: Mutex<HashMap<String, usize>>,
}

impl RacingSlugStore {
    pub fn new(inner: Arc<dyn SlugStore>) -> Self {
        Self {
            inner,
            blind: Mutex::new(HashMap::new()),
        }
    }

    pub fn blind_to(self, token: &str, times: usize) -> Self {
        self.blind.lock().unwrap().insert(token.to_string(), times);
        self
    }
}

#[async_trait]
impl SlugStore for RacingSlugStore {
    async fn exists_by_token(
        &self,
        kind: EntityKind,
        token: &Slug,
        exclude_owner: Option<OwnerRef>,
    ) -> DomainResult<bool> {
        {
            let mut blind = self.blind.lock().unwrap();
            if let Some(remaining) = blind.get_mut(token.as_str()) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Ok(false);
                }
            }
        }
        self.inner.exists_by_token(kind, token, exclude_owner).await
    }
}

/// Every probe fails as if the database were unreachable.
#[derive(Default)]
pub struct UnavailableSlugStore {
    pub probes: AtomicUsize,
}

#[async_trait]
impl SlugStore for UnavailableSlugStore {
    async fn exists_by_token(
        &self,
        _kind: EntityKind,
        _token: &Slug,
        _exclude_owner: Option<OwnerRef>,
    ) -> DomainResult<bool> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Persistence("connection refused".into()))
    }
}
