// src/presentation/http/controllers/snippets.rs
use crate::application::{
    commands::snippets::{
        CreateSnippetCommand, DeleteSnippetCommand, RecordViewCommand, UpdateSnippetCommand,
    },
    dto::{SnippetDto, ViewCountDto},
    queries::snippets::{GetSnippetByIdQuery, GetSnippetBySlugQuery, ListSnippetsQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::openapi::{SnippetListResponse, StatusResponse};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

fn default_public() -> bool {
    true
}

/// Listing filters. Both `snake_case` and `camelCase` keys are accepted.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SnippetListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub language: Option<String>,
    /// Tag slug.
    pub tag: Option<String>,
    pub search: Option<String>,
    #[serde(alias = "authorId")]
    pub author_id: Option<i64>,
    #[serde(alias = "isPublic")]
    pub is_public: Option<bool>,
    /// `created_at`, `updated_at`, `view_count` or `title`.
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<String>,
}

impl From<SnippetListParams> for ListSnippetsQuery {
    fn from(params: SnippetListParams) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            language: params.language,
            tag: params.tag,
            search: params.search,
            author_id: params.author_id,
            is_public: params.is_public,
            sort_by: params.sort_by,
            sort_order: params.sort_order,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSnippetRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    pub language: String,
    #[serde(default = "default_public", alias = "isPublic")]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSnippetRequest {
    pub title: Option<String>,
    /// An empty string removes the description.
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    #[serde(alias = "isPublic")]
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets",
    params(SnippetListParams),
    responses(
        (status = 200, description = "One page of visible snippets.", body = SnippetListResponse),
        (status = 400, description = "Invalid paging or sort parameters.", body = ErrorResponse)
    ),
    tag = "Snippets"
)]
pub async fn list_snippets(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<SnippetListParams>,
) -> HttpResult<Json<SnippetListResponse>> {
    state
        .services
        .snippet_queries
        .list_snippets(actor.0.as_ref(), params.into())
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets/by-slug/{slug}",
    params(("slug" = String, Path, description = "Snippet slug")),
    responses(
        (status = 200, description = "Snippet found.", body = SnippetDto),
        (status = 404, description = "No visible snippet under this slug.", body = ErrorResponse)
    ),
    tag = "Snippets"
)]
pub async fn get_snippet_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<SnippetDto>> {
    state
        .services
        .snippet_queries
        .get_snippet_by_slug(actor.0.as_ref(), GetSnippetBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Snippet found.", body = SnippetDto),
        (status = 403, description = "Snippet is private.", body = ErrorResponse),
        (status = 404, description = "Snippet not found.", body = ErrorResponse)
    ),
    tag = "Snippets"
)]
pub async fn get_snippet(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SnippetDto>> {
    state
        .services
        .snippet_queries
        .get_snippet_by_id(actor.0.as_ref(), GetSnippetByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/snippets",
    request_body = CreateSnippetRequest,
    responses(
        (status = 201, description = "Snippet created under a fresh slug.", body = SnippetDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 401, description = "Authentication required.", body = ErrorResponse),
        (status = 503, description = "Slug store unavailable.", body = ErrorResponse)
    ),
    tag = "Snippets"
)]
pub async fn create_snippet(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateSnippetRequest>,
) -> HttpResult<(StatusCode, Json<SnippetDto>)> {
    let command = CreateSnippetCommand {
        title: payload.title,
        description: payload.description,
        code: payload.code,
        language: payload.language,
        is_public: payload.is_public,
        tags: payload.tags,
    };

    let created = state
        .services
        .snippet_commands
        .create_snippet(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet id")),
    request_body = UpdateSnippetRequest,
    responses(
        (status = 200, description = "Snippet updated.", body = SnippetDto),
        (status = 403, description = "Not the author.", body = ErrorResponse),
        (status = 404, description = "Snippet not found.", body = ErrorResponse)
    ),
    tag = "Snippets"
)]
pub async fn update_snippet(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSnippetRequest>,
) -> HttpResult<Json<SnippetDto>> {
    let command = UpdateSnippetCommand {
        id,
        title: payload.title,
        description: payload.description,
        code: payload.code,
        language: payload.language,
        is_public: payload.is_public,
        tags: payload.tags,
    };

    state
        .services
        .snippet_commands
        .update_snippet(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Snippet deleted.", body = StatusResponse),
        (status = 403, description = "Not the author.", body = ErrorResponse),
        (status = 404, description = "Snippet not found.", body = ErrorResponse)
    ),
    tag = "Snippets"
)]
pub async fn delete_snippet(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .snippet_commands
        .delete_snippet(&user, DeleteSnippetCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/snippets/{id}/view",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "View recorded.", body = ViewCountDto),
        (status = 404, description = "Snippet not found.", body = ErrorResponse),
        (status = 429, description = "Too many views from this client.")
    ),
    security(()),
    tag = "Snippets"
)]
pub async fn record_view(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ViewCountDto>> {
    state
        .services
        .snippet_commands
        .record_view(RecordViewCommand { id })
        .await
        .into_http()
        .map(Json)
}
