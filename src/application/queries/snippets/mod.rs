mod get_by_id;
mod get_by_slug;
mod list;
mod service;

pub use get_by_id::GetSnippetByIdQuery;
pub use get_by_slug::GetSnippetBySlugQuery;
pub use list::ListSnippetsQuery;
pub use service::SnippetQueryService;
