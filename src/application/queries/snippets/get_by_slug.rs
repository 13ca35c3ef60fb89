use super::SnippetQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, SnippetDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::Slug,
};

pub struct GetSnippetBySlugQuery {
    pub slug: String,
}

impl SnippetQueryService {
    /// Unlike lookups by id, a hidden snippet is indistinguishable from a
    /// missing one here.
    pub async fn get_snippet_by_slug(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetSnippetBySlugQuery,
    ) -> ApplicationResult<SnippetDto> {
        let slug =
            Slug::new(query.slug).map_err(|_| ApplicationError::not_found("snippet not found"))?;
        let snippet = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|snippet| snippet.is_visible_to(actor.map(|a| a.id)))
            .ok_or_else(|| ApplicationError::not_found("snippet not found"))?;

        Ok(snippet.into())
    }
}
