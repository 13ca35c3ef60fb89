// src/application/commands/snippets/delete.rs
use super::SnippetCommandService;
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::snippet::{
        SnippetId,
        specifications::{CanModifySnippetSpec, SnippetSpecification},
    },
};

pub struct DeleteSnippetCommand {
    pub id: i64,
}

impl SnippetCommandService {
    pub async fn delete_snippet(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteSnippetCommand,
    ) -> ApplicationResult<()> {
        let id = SnippetId::new(command.id)?;
        let snippet = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("snippet not found"))?;

        let spec = CanModifySnippetSpec::delete(&actor.capabilities, &snippet, actor.id);
        if !spec.is_satisfied() {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to delete snippet",
            ));
        }

        self.write_repo.delete(id).await?;
        tracing::info!(snippet_id = id.0, "snippet deleted");
        Ok(())
    }
}
