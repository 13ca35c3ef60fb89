use crate::domain::snippet::{Snippet, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.into(),
            name: tag.name.into_inner(),
            slug: tag.slug.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnippetDto {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    pub language: String,
    pub language_display_name: String,
    pub reading_time_minutes: u32,
    pub view_count: i64,
    pub is_public: bool,
    pub author_id: i64,
    pub tags: Vec<TagDto>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Snippet> for SnippetDto {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id.into(),
            slug: snippet.slug.into_inner(),
            title: snippet.title.into_inner(),
            description: snippet.description.map(|d| d.into_inner()),
            language_display_name: snippet.language.display_name(),
            reading_time_minutes: snippet.code.reading_time_minutes(),
            code: snippet.code.into_inner(),
            language: snippet.language.into_inner(),
            view_count: snippet.view_count,
            is_public: snippet.is_public,
            author_id: snippet.author_id.into(),
            tags: snippet.tags.into_iter().map(TagDto::from).collect(),
            created_at: snippet.created_at,
            updated_at: snippet.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ViewCountDto {
    pub success: bool,
    pub views: i64,
}
