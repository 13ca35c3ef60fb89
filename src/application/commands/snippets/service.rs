// src/application/commands/snippets/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::{
        slug::{Normalizer, SlugAllocator},
        snippet::{SnippetReadRepository, SnippetWriteRepository},
    },
};

pub struct SnippetCommandService {
    pub(super) write_repo: Arc<dyn SnippetWriteRepository>,
    pub(super) read_repo: Arc<dyn SnippetReadRepository>,
    pub(super) slugs: Arc<SlugAllocator>,
    pub(super) tag_normalizer: Normalizer,
    pub(super) clock: Arc<dyn Clock>,
}

impl SnippetCommandService {
    pub fn new(
        write_repo: Arc<dyn SnippetWriteRepository>,
        read_repo: Arc<dyn SnippetReadRepository>,
        slugs: Arc<SlugAllocator>,
        tag_normalizer: Normalizer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slugs,
            tag_normalizer,
            clock,
        }
    }
}
