// src/domain/slug/mod.rs
//! Allocation of unique, URL-safe identifiers derived from free-text labels.
//!
//! A [`SlugAllocator`] normalizes a label into a base token and probes the
//! backing [`SlugStore`] until it finds a candidate no other record holds.
//! The store's unique constraint remains the final arbiter: the allocator only
//! proposes a slug that was free when it was probed.

mod allocator;
mod error;
mod normalizer;
mod prober;
mod value_objects;

pub use allocator::{AllocationPolicy, SlugAllocator};
pub use error::SlugError;
pub use normalizer::{Normalizer, SlugGenerator};
pub use prober::{CollisionProber, SlugStore};
pub use value_objects::{EntityKind, OwnerRef, Slug};
