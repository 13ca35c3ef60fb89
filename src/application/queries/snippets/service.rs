use std::sync::Arc;

use crate::domain::{slug::Normalizer, snippet::SnippetReadRepository};

pub struct SnippetQueryService {
    pub(super) read_repo: Arc<dyn SnippetReadRepository>,
    pub(super) tag_normalizer: Normalizer,
}

impl SnippetQueryService {
    pub fn new(read_repo: Arc<dyn SnippetReadRepository>, tag_normalizer: Normalizer) -> Self {
        Self {
            read_repo,
            tag_normalizer,
        }
    }
}
