// src/application/commands/snippets/tags.rs
use std::collections::HashSet;

use super::SnippetCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::snippet::{NewTag, TagName},
};

pub(super) const MAX_TAGS: usize = 10;

impl SnippetCommandService {
    /// Validates raw tag names without touching storage. Names that normalize
    /// to the same slug are one tag; the first spelling seen names it.
    pub(super) fn prepare_tags(&self, raw: &[String]) -> ApplicationResult<Vec<NewTag>> {
        let mut seen = HashSet::new();
        let mut prepared = Vec::new();

        for value in raw {
            let name = TagName::new(value.as_str())?;
            let slug = self.tag_normalizer.normalize(name.as_str())?;
            if seen.insert(slug.clone()) {
                prepared.push(NewTag { name, slug });
            }
        }

        if prepared.len() > MAX_TAGS {
            return Err(ApplicationError::validation(format!(
                "a snippet may have at most {MAX_TAGS} tags"
            )));
        }
        Ok(prepared)
    }
}
