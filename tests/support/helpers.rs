// tests/support/helpers.rs
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use snipshare::application::services::{ApplicationServices, Repositories};
use snipshare::domain::slug::{AllocationPolicy, SlugStore};
use snipshare::domain::user::{Email, NewUser, PasswordHash, Role, Username};
use snipshare::domain::user::UserRepository;
use snipshare::infrastructure::util::DefaultSlugGenerator;
use snipshare::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};

use super::mocks::{DummyClock, DummyPasswordHasher, DummyTokenManager, InMemoryStore, fixed_now};

pub fn build_services(store: Arc<InMemoryStore>) -> Arc<ApplicationServices> {
    build_services_with(store.clone(), store, AllocationPolicy::default())
}

/// Services whose allocators probe `slug_store` instead of the store itself.
pub fn build_services_with(
    store: Arc<InMemoryStore>,
    slug_store: Arc<dyn SlugStore>,
    policy: AllocationPolicy,
) -> Arc<ApplicationServices> {
    let repos = Repositories {
        users: store.clone(),
        snippet_writes: store.clone(),
        snippet_reads: store,
        slug_store,
    };
    Arc::new(ApplicationServices::new(
        repos,
        Arc::new(DummyPasswordHasher),
        Arc::new(DummyTokenManager),
        Arc::new(DummyClock),
        Arc::new(DefaultSlugGenerator),
        policy,
    ))
}

/// Inserts alice (admin, id 1), bob (id 2) and carol (id 3), matching the
/// mock tokens.
pub async fn seed_users(store: &InMemoryStore) {
    for (name, role) in [
        ("alice", Role::Admin),
        ("bob", Role::Member),
        ("carol", Role::Member),
    ] {
        let user = NewUser::with_credentials(
            Username::new(name).unwrap(),
            Email::new(format!("{name}@example.com")).unwrap(),
            PasswordHash::new("hashed:password1").unwrap(),
            role,
            fixed_now(),
        );
        UserRepository::insert(store, user).await.unwrap();
    }
}

pub async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::default());
    seed_users(&store).await;
    store
}

pub fn router_for(services: Arc<ApplicationServices>) -> Router {
    build_router_with_rate_limiter(HttpState { services }, &[], false)
}

pub async fn make_test_router() -> (Router, Arc<InMemoryStore>) {
    let store = seeded_store().await;
    (router_for(build_services(store.clone())), store)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Asserts the status and the `error` field of an error body.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let body = read_json(resp).await;
    assert_eq!(body["error"], expected_error, "unexpected body: {body}");
    assert!(body["message"].is_string());
}

pub async fn actor(
    services: &ApplicationServices,
    token: &str,
) -> snipshare::application::dto::AuthenticatedUser {
    services.authenticate(token).await.unwrap()
}
