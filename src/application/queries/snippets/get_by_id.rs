use super::SnippetQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, SnippetDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::snippet::SnippetId,
};

pub struct GetSnippetByIdQuery {
    pub id: i64,
}

impl SnippetQueryService {
    /// A private snippet requested by someone other than its author is
    /// reported as forbidden.
    pub async fn get_snippet_by_id(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetSnippetByIdQuery,
    ) -> ApplicationResult<SnippetDto> {
        let id = SnippetId::new(query.id)?;
        let snippet = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("snippet not found"))?;

        if !snippet.is_visible_to(actor.map(|a| a.id)) {
            return Err(ApplicationError::forbidden("snippet is private"));
        }

        Ok(snippet.into())
    }
}
