// src/domain/slug/normalizer.rs
use std::sync::Arc;

use super::{error::SlugError, value_objects::Slug};

/// Turns arbitrary text into a lowercase, hyphen-separated ASCII token.
///
/// Implementations may return an empty string when nothing survives
/// transliteration; [`Normalizer`] turns that into [`SlugError::InvalidLabel`].
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

#[derive(Clone)]
pub struct Normalizer {
    generator: Arc<dyn SlugGenerator>,
}

impl Normalizer {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    pub fn normalize(&self, label: &str) -> Result<Slug, SlugError> {
        let token = self.generator.slugify(label);
        Slug::new(token).map_err(|_| SlugError::InvalidLabel {
            label: label.to_owned(),
        })
    }
}
