// src/application/queries/snippets/list.rs
use super::SnippetQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PageInfo, Paginated, SnippetDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        snippet::{PageRequest, SnippetFilter, SortField, SortOrder, Visibility},
        user::UserId,
    },
};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

#[derive(Debug, Default)]
pub struct ListSnippetsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub language: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub author_id: Option<i64>,
    pub is_public: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl SnippetQueryService {
    pub async fn list_snippets(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListSnippetsQuery,
    ) -> ApplicationResult<Paginated<SnippetDto>> {
        let page = self.normalize_page(query.page, query.limit)?;
        let filter = self.build_filter(actor, query)?;

        let (records, total) = self.read_repo.list_page(&filter, page).await?;
        let items = records.into_iter().map(Into::into).collect();

        Ok(Paginated::new(
            items,
            PageInfo::new(page.page, page.limit, total),
        ))
    }

    pub(super) fn normalize_page(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ApplicationResult<PageRequest> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            return Err(ApplicationError::validation("page must be at least 1"));
        }
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApplicationError::validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(PageRequest { page, limit })
    }

    fn build_filter(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListSnippetsQuery,
    ) -> ApplicationResult<SnippetFilter> {
        let mut author_id = query.author_id.map(UserId::new).transpose()?;

        let visibility = match (query.is_public, actor) {
            (Some(true), _) => Visibility::Exactly(true),
            // Private listings are confined to the caller's own snippets.
            (Some(false), Some(actor)) => {
                if author_id.is_some_and(|id| id != actor.id) {
                    return Err(ApplicationError::forbidden(
                        "private snippets of other users cannot be listed",
                    ));
                }
                author_id = Some(actor.id);
                Visibility::Exactly(false)
            }
            (Some(false), None) => {
                return Err(ApplicationError::unauthorized(
                    "authentication required to list private snippets",
                ));
            }
            (None, Some(actor)) => Visibility::PublicOrOwnedBy(actor.id),
            (None, None) => Visibility::PublicOnly,
        };

        let mut filter = SnippetFilter::new(visibility);
        filter.language = non_blank(query.language);
        // Same normalization as when tags are attached, so `C++` finds `c`.
        filter.tag = non_blank(query.tag)
            .map(|raw| self.tag_normalizer.normalize(&raw))
            .transpose()?;
        filter.search = non_blank(query.search);
        filter.author_id = author_id;
        if let Some(raw) = query.sort_by.as_deref() {
            filter.sort_by = raw.parse::<SortField>()?;
        }
        if let Some(raw) = query.sort_order.as_deref() {
            filter.sort_order = raw.parse::<SortOrder>()?;
        }
        Ok(filter)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
