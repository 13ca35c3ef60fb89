// src/domain/snippet/mod.rs
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{NewSnippet, NewTag, Snippet, SnippetUpdate, Tag};
pub use repository::{
    PageRequest, SnippetFilter, SnippetReadRepository, SnippetWriteRepository, Visibility,
};
pub use value_objects::{
    Language, SnippetCode, SnippetDescription, SnippetId, SnippetTitle, SortField, SortOrder,
    TagId, TagName,
};
