// src/domain/slug/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlugError {
    #[error("label '{label}' does not produce a usable slug")]
    InvalidLabel { label: String },

    #[error("slug store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("no free slug for '{base}' after {attempts} attempts")]
    AllocationExhausted { base: String, attempts: u32 },
}
