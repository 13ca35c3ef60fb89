// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod repos;
pub mod security;
pub mod slug_stores;
pub mod time;

pub use repos::InMemoryStore;
pub use security::{
    ADMIN_TOKEN, DummyPasswordHasher, DummyTokenManager, MEMBER_TOKEN, OTHER_TOKEN,
};
pub use slug_stores::{RacingSlugStore, UnavailableSlugStore};
pub use time::{DummyClock, fixed_now};
