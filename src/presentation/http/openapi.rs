// src/presentation/http/openapi.rs
use crate::application::dto::{PageInfo, Paginated, SnippetDto};
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SnippetListResponse {
    pub items: Vec<SnippetDto>,
    pub pagination: PageInfo,
}

impl From<Paginated<SnippetDto>> for SnippetListResponse {
    fn from(page: Paginated<SnippetDto>) -> Self {
        Self {
            items: page.items,
            pagination: page.pagination,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::snippets::list_snippets,
        crate::presentation::http::controllers::snippets::get_snippet_by_slug,
        crate::presentation::http::controllers::snippets::get_snippet,
        crate::presentation::http::controllers::snippets::create_snippet,
        crate::presentation::http::controllers::snippets::update_snippet,
        crate::presentation::http::controllers::snippets::delete_snippet,
        crate::presentation::http::controllers::snippets::record_view,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            SnippetListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::snippets::SnippetListParams,
            crate::presentation::http::controllers::snippets::CreateSnippetRequest,
            crate::presentation::http::controllers::snippets::UpdateSnippetRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::SnippetDto,
            crate::application::dto::TagDto,
            crate::application::dto::ViewCountDto,
            crate::application::dto::PageInfo
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current user"),
        (name = "Snippets", description = "Snippet publishing and discovery"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&BearerAuth),
    security(("bearerAuth" = [])),
    info(
        title = "Snipshare API",
        description = "Code snippet sharing backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new().merge(swagger).merge(redoc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_snippet_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/snippets",
            "/api/v1/snippets/{id}",
            "/api/v1/snippets/by-slug/{slug}",
            "/api/v1/snippets/{id}/view",
            "/api/v1/auth/login",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
    }
}
