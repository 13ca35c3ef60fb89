use crate::domain::slug::SlugGenerator;
use slug::slugify;

/// Transliterating slugger backed by the `slug` crate.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}
