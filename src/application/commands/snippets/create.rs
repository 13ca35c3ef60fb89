// src/application/commands/snippets/create.rs
use super::{SnippetCommandService, capability::ensure_capability};
use crate::{
    application::{
        commands::MAX_COMMIT_ATTEMPTS,
        dto::{AuthenticatedUser, SnippetDto},
        error::ApplicationResult,
    },
    domain::{
        errors::DomainError,
        snippet::{Language, NewSnippet, Snippet, SnippetCode, SnippetDescription, SnippetTitle},
    },
};

pub struct CreateSnippetCommand {
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub language: String,
    pub is_public: bool,
    pub tags: Vec<String>,
}

impl CreateSnippetCommand {
    pub fn builder() -> CreateSnippetCommandBuilder {
        CreateSnippetCommandBuilder::default()
    }
}

pub struct CreateSnippetCommandBuilder {
    title: Option<String>,
    description: Option<String>,
    code: Option<String>,
    language: Option<String>,
    is_public: bool,
    tags: Vec<String>,
}

impl Default for CreateSnippetCommandBuilder {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            code: None,
            language: None,
            is_public: true,
            tags: Vec::new(),
        }
    }
}

impl CreateSnippetCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<CreateSnippetCommand, &'static str> {
        Ok(CreateSnippetCommand {
            title: self.title.ok_or("title is required")?,
            description: self.description,
            code: self.code.ok_or("code is required")?,
            language: self.language.ok_or("language is required")?,
            is_public: self.is_public,
            tags: self.tags,
        })
    }
}

impl SnippetCommandService {
    pub async fn create_snippet(
        &self,
        actor: &AuthenticatedUser,
        command: CreateSnippetCommand,
    ) -> ApplicationResult<SnippetDto> {
        ensure_capability(actor, "snippets", "create")?;

        let title = SnippetTitle::new(command.title)?;
        let description = match command.description {
            Some(raw) => SnippetDescription::parse(raw)?,
            None => None,
        };
        let code = SnippetCode::new(command.code)?;
        let language = Language::new(command.language)?;
        let tags = self.prepare_tags(&command.tags)?;

        let slug = self.slugs.allocate(title.as_str(), None).await?;
        let now = self.clock.now();

        let new_snippet = NewSnippet {
            title,
            slug,
            description,
            code,
            language,
            is_public: command.is_public,
            author_id: actor.id,
            tags,
            created_at: now,
            updated_at: now,
        };

        let created = self.insert_with_retry(new_snippet).await?;
        tracing::info!(snippet_id = created.id.0, slug = %created.slug, "snippet created");
        Ok(created.into())
    }

    /// Commits `snippet`, re-allocating its slug when another writer took the
    /// probed one between probe and commit.
    async fn insert_with_retry(&self, mut snippet: NewSnippet) -> ApplicationResult<Snippet> {
        let mut attempt = 1;
        loop {
            match self.write_repo.insert(snippet.clone()).await {
                Ok(created) => return Ok(created),
                Err(DomainError::SlugTaken(taken)) if attempt < MAX_COMMIT_ATTEMPTS => {
                    tracing::warn!(slug = %taken, attempt, "slug commit lost a race; re-allocating");
                    let fresh = self.slugs.allocate(snippet.title.as_str(), None).await?;
                    snippet = snippet.with_slug(fresh);
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
