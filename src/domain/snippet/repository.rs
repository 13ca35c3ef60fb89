// src/domain/snippet/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::Slug;
use crate::domain::snippet::entity::{NewSnippet, Snippet, SnippetUpdate};
use crate::domain::snippet::value_objects::{SnippetId, SortField, SortOrder};
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Which snippets a listing may return, before the other filters apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    PublicOnly,
    PublicOrOwnedBy(UserId),
    Exactly(bool),
}

#[derive(Debug, Clone)]
pub struct SnippetFilter {
    pub visibility: Visibility,
    pub language: Option<String>,
    /// Normalized tag slug.
    pub tag: Option<Slug>,
    pub search: Option<String>,
    pub author_id: Option<UserId>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl SnippetFilter {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            language: None,
            tag: None,
            search: None,
            author_id: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[async_trait]
pub trait SnippetWriteRepository: Send + Sync {
    /// Fails with `DomainError::SlugTaken` when the slug was committed elsewhere first.
    /// Tags are created and linked in the same transaction as the snippet.
    async fn insert(&self, snippet: NewSnippet) -> DomainResult<Snippet>;
    async fn update(&self, update: SnippetUpdate) -> DomainResult<Snippet>;
    async fn delete(&self, id: SnippetId) -> DomainResult<()>;
    /// Returns the new count, or `None` when the snippet does not exist.
    async fn increment_view_count(&self, id: SnippetId) -> DomainResult<Option<i64>>;
}

#[async_trait]
pub trait SnippetReadRepository: Send + Sync {
    async fn find_by_id(&self, id: SnippetId) -> DomainResult<Option<Snippet>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Snippet>>;
    async fn list_page(
        &self,
        filter: &SnippetFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<Snippet>, u64)>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(PageRequest { page: 3, limit: 10 }.offset(), 20);
        assert_eq!(PageRequest { page: 0, limit: 10 }.offset(), 0);
    }
}
