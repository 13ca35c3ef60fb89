// src/application/commands/snippets/update.rs
use super::SnippetCommandService;
use crate::{
    application::{
        commands::MAX_COMMIT_ATTEMPTS,
        dto::{AuthenticatedUser, SnippetDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        snippet::{
            Language, Snippet, SnippetCode, SnippetDescription, SnippetId, SnippetTitle,
            SnippetUpdate,
            specifications::{CanModifySnippetSpec, SnippetSpecification},
        },
    },
};

/// Absent fields are left untouched. A blank `description` clears it.
#[derive(Default)]
pub struct UpdateSnippetCommand {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl SnippetCommandService {
    pub async fn update_snippet(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateSnippetCommand,
    ) -> ApplicationResult<SnippetDto> {
        let id = SnippetId::new(command.id)?;
        let snippet = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("snippet not found"))?;

        let spec = CanModifySnippetSpec::update(&actor.capabilities, &snippet, actor.id);
        if !spec.is_satisfied() {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to update snippet",
            ));
        }

        let update = self.build_update(&snippet, command).await?;
        if update.is_empty() {
            return Ok(snippet.into());
        }

        let updated = self.update_with_retry(update).await?;
        Ok(updated.into())
    }

    async fn build_update(
        &self,
        snippet: &Snippet,
        command: UpdateSnippetCommand,
    ) -> ApplicationResult<SnippetUpdate> {
        let UpdateSnippetCommand {
            id: _,
            title,
            description,
            code,
            language,
            is_public,
            tags,
        } = command;

        let mut update = SnippetUpdate::new(snippet.id, self.clock.now());

        // The slug only moves when the title actually changes.
        if let Some(raw) = title {
            let title = SnippetTitle::new(raw)?;
            if title != snippet.title {
                let slug = self
                    .slugs
                    .allocate(title.as_str(), Some(snippet.id.into()))
                    .await?;
                update = update.with_title(title).with_slug(slug);
            }
        }
        if let Some(raw) = description {
            update = update.with_description(SnippetDescription::parse(raw)?);
        }
        if let Some(raw) = code {
            update = update.with_code(SnippetCode::new(raw)?);
        }
        if let Some(raw) = language {
            update = update.with_language(Language::new(raw)?);
        }
        if let Some(flag) = is_public {
            update = update.with_is_public(flag);
        }
        if let Some(raw_tags) = tags {
            update = update.with_tags(self.prepare_tags(&raw_tags)?);
        }

        Ok(update)
    }

    async fn update_with_retry(&self, mut update: SnippetUpdate) -> ApplicationResult<Snippet> {
        let mut attempt = 1;
        loop {
            match self.write_repo.update(update.clone()).await {
                Ok(updated) => return Ok(updated),
                Err(DomainError::SlugTaken(taken)) if attempt < MAX_COMMIT_ATTEMPTS => {
                    let Some(title) = update.title.clone() else {
                        return Err(DomainError::SlugTaken(taken).into());
                    };
                    tracing::warn!(slug = %taken, attempt, "slug commit lost a race; re-allocating");
                    let fresh = self
                        .slugs
                        .allocate(title.as_str(), Some(update.id.into()))
                        .await?;
                    update = update.with_slug(fresh);
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
