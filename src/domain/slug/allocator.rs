// src/domain/slug/allocator.rs
use std::sync::Arc;

use uuid::Uuid;

use super::{
    error::SlugError,
    normalizer::{Normalizer, SlugGenerator},
    prober::{CollisionProber, SlugStore},
    value_objects::{EntityKind, OwnerRef, Slug},
};

const DEFAULT_MAX_ATTEMPTS: u32 = 100;
const DEFAULT_FALLBACK_ATTEMPTS: u32 = 3;
const FALLBACK_SUFFIX_LEN: usize = 8;

/// Bounds on the probe loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationPolicy {
    /// Numbered candidates probed, counting the bare base token.
    pub max_attempts: u32,
    /// Random-suffix candidates probed once the numbered ones run out.
    pub fallback_attempts: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fallback_attempts: DEFAULT_FALLBACK_ATTEMPTS,
        }
    }
}

/// Produces slugs that were free in one [`EntityKind`] at the moment of probing.
#[derive(Clone)]
pub struct SlugAllocator {
    normalizer: Normalizer,
    prober: CollisionProber,
    policy: AllocationPolicy,
}

impl SlugAllocator {
    pub fn new(
        kind: EntityKind,
        store: Arc<dyn SlugStore>,
        generator: Arc<dyn SlugGenerator>,
        policy: AllocationPolicy,
    ) -> Self {
        Self {
            normalizer: Normalizer::new(generator),
            prober: CollisionProber::new(store, kind),
            policy,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.prober.kind()
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    pub fn normalize(&self, label: &str) -> Result<Slug, SlugError> {
        self.normalizer.normalize(label)
    }

    pub async fn is_taken(
        &self,
        token: &Slug,
        exclude_owner: Option<OwnerRef>,
    ) -> Result<bool, SlugError> {
        self.prober.is_taken(token, exclude_owner).await
    }

    /// Probes `base`, `base-1`, `base-2`, ... and returns the first free
    /// candidate. A record named by `exclude_owner` never collides with itself.
    pub async fn allocate(
        &self,
        label: &str,
        exclude_owner: Option<OwnerRef>,
    ) -> Result<Slug, SlugError> {
        let base = self.normalizer.normalize(label)?;
        let max_attempts = self.policy.max_attempts.max(1);

        let mut candidate = base.clone();
        let mut counter: u32 = 0;
        loop {
            if !self.prober.is_taken(&candidate, exclude_owner).await? {
                if counter > 0 {
                    tracing::debug!(
                        kind = %self.kind(),
                        slug = %candidate,
                        collisions = counter,
                        "allocated suffixed slug"
                    );
                }
                return Ok(candidate);
            }

            counter += 1;
            if counter >= max_attempts {
                break;
            }
            candidate = base.with_suffix(counter);
        }

        self.allocate_fallback(&base, exclude_owner, counter).await
    }

    async fn allocate_fallback(
        &self,
        base: &Slug,
        exclude_owner: Option<OwnerRef>,
        numbered_attempts: u32,
    ) -> Result<Slug, SlugError> {
        tracing::warn!(
            kind = %self.kind(),
            base = %base,
            attempts = numbered_attempts,
            "numbered slug suffixes exhausted; trying random suffixes"
        );

        for _ in 0..self.policy.fallback_attempts {
            let candidate = base.with_suffix(random_suffix());
            if !self.prober.is_taken(&candidate, exclude_owner).await? {
                return Ok(candidate);
            }
        }

        Err(SlugError::AllocationExhausted {
            base: base.to_string(),
            attempts: numbered_attempts + self.policy.fallback_attempts,
        })
    }
}

fn random_suffix() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(FALLBACK_SUFFIX_LEN);
    token
}
