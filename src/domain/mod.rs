// src/domain/mod.rs
pub mod errors;
pub mod slug;
pub mod snippet;
pub mod user;
