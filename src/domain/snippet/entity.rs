// src/domain/snippet/entity.rs
use crate::domain::slug::Slug;
use crate::domain::snippet::value_objects::{
    Language, SnippetCode, SnippetDescription, SnippetId, SnippetTitle, TagId, TagName,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
    pub slug: Slug,
}

/// A tag to link, created on first use. Identified by `slug` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: TagName,
    pub slug: Slug,
}

#[derive(Debug, Clone)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: SnippetTitle,
    pub slug: Slug,
    pub description: Option<SnippetDescription>,
    pub code: SnippetCode,
    pub language: Language,
    pub is_public: bool,
    pub view_count: i64,
    pub author_id: UserId,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn is_visible_to(&self, viewer: Option<UserId>) -> bool {
        self.is_public || viewer == Some(self.author_id)
    }

    pub fn rename(&mut self, title: SnippetTitle, slug: Slug, now: DateTime<Utc>) {
        self.title = title;
        self.slug = slug;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub title: SnippetTitle,
    pub slug: Slug,
    pub description: Option<SnippetDescription>,
    pub code: SnippetCode,
    pub language: Language,
    pub is_public: bool,
    pub author_id: UserId,
    pub tags: Vec<NewTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewSnippet {
    /// Same snippet under a freshly allocated slug, for retrying a lost commit.
    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = slug;
        self
    }
}

/// Partial update. `description: Some(None)` clears the description.
#[derive(Debug, Clone)]
pub struct SnippetUpdate {
    pub id: SnippetId,
    pub title: Option<SnippetTitle>,
    pub slug: Option<Slug>,
    pub description: Option<Option<SnippetDescription>>,
    pub code: Option<SnippetCode>,
    pub language: Option<Language>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<NewTag>>,
    pub updated_at: DateTime<Utc>,
}

impl SnippetUpdate {
    pub fn new(id: SnippetId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            description: None,
            code: None,
            language: None,
            is_public: None,
            tags: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: SnippetTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_description(mut self, description: Option<SnippetDescription>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_code(mut self, code: SnippetCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_is_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    pub fn with_tags(mut self, tags: Vec<NewTag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.code.is_none()
            && self.language.is_none()
            && self.is_public.is_none()
            && self.tags.is_none()
    }
}
