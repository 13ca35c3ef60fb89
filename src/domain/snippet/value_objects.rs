// src/domain/snippet/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::OwnerRef;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 10;
const DESCRIPTION_MAX: usize = 500;
const CODE_MAX: usize = 50_000;
const LANGUAGE_MAX: usize = 50;
const TAG_NAME_MAX: usize = 32;

fn check_length(field: &str, value: &str, min: usize, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len < min {
        return Err(DomainError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(DomainError::Validation(format!(
            "{field} must not exceed {max} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnippetId(pub i64);

impl SnippetId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("snippet id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SnippetId> for i64 {
    fn from(value: SnippetId) -> Self {
        value.0
    }
}

impl From<SnippetId> for OwnerRef {
    fn from(value: SnippetId) -> Self {
        OwnerRef(value.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetTitle(String);

impl SnippetTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_owned();
        check_length("title", &value, TITLE_MIN, TITLE_MAX)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SnippetTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetDescription(String);

impl SnippetDescription {
    /// Blank input means "no description".
    pub fn parse(value: impl Into<String>) -> DomainResult<Option<Self>> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Ok(None);
        }
        check_length("description", &value, DESCRIPTION_MIN, DESCRIPTION_MAX)?;
        Ok(Some(Self(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Source text, stored with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCode(String);

impl SnippetCode {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(DomainError::Validation("code is required".into()));
        }
        check_length("code", &value, 1, CODE_MAX)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whole minutes at 200 words per minute, never less than one.
    pub fn reading_time_minutes(&self) -> u32 {
        const WORDS_PER_MINUTE: usize = 200;
        let words = self.0.split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language(String);

impl Language {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(DomainError::Validation("language is required".into()));
        }
        if value.chars().count() > LANGUAGE_MAX {
            return Err(DomainError::Validation("language name is too long".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Human-friendly name for common short codes; otherwise the code upper-cased.
    pub fn display_name(&self) -> String {
        let name = match self.0.to_lowercase().as_str() {
            "js" => "JavaScript",
            "ts" => "TypeScript",
            "jsx" => "React JSX",
            "tsx" => "React TSX",
            "py" => "Python",
            "rb" => "Ruby",
            "go" => "Go",
            "rs" => "Rust",
            "java" => "Java",
            "cpp" => "C++",
            "c" => "C",
            "cs" => "C#",
            "php" => "PHP",
            "swift" => "Swift",
            "kt" => "Kotlin",
            "sql" => "SQL",
            "html" => "HTML",
            "css" => "CSS",
            "scss" => "SCSS",
            "json" => "JSON",
            "yaml" => "YAML",
            "md" => "Markdown",
            "sh" => "Shell",
            "bash" => "Bash",
            _ => return self.0.to_uppercase(),
        };
        name.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagName(String);

impl TagName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_owned();
        check_length("tag", &value, 1, TAG_NAME_MAX)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(pub i64);

impl From<TagId> for i64 {
    fn from(value: TagId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    ViewCount,
    Title,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::ViewCount => "view_count",
            SortField::Title => "title",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" | "createdAt" => Ok(SortField::CreatedAt),
            "updated_at" | "updatedAt" => Ok(SortField::UpdatedAt),
            "view_count" | "viewCount" => Ok(SortField::ViewCount),
            "title" => Ok(SortField::Title),
            other => Err(DomainError::Validation(format!(
                "unknown sort field '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::Validation(format!(
                "unknown sort order '{other}'"
            ))),
        }
    }
}
