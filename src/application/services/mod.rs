// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{snippets::SnippetCommandService, users::UserCommandService},
        dto::AuthenticatedUser,
        ports::{ClockPort, PasswordHasherPort, TokenManagerPort},
        queries::{snippets::SnippetQueryService, users::UserQueryService},
    },
    domain::{
        slug::{AllocationPolicy, EntityKind, Normalizer, SlugAllocator, SlugGenerator, SlugStore},
        snippet::{SnippetReadRepository, SnippetWriteRepository},
        user::UserRepository,
    },
};

/// Repositories the services are built over.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub snippet_writes: Arc<dyn SnippetWriteRepository>,
    pub snippet_reads: Arc<dyn SnippetReadRepository>,
    pub slug_store: Arc<dyn SlugStore>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub snippet_commands: Arc<SnippetCommandService>,
    pub snippet_queries: Arc<SnippetQueryService>,
    pub user_queries: Arc<UserQueryService>,
    token_manager: Arc<TokenManagerPort>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<PasswordHasherPort>,
        token_manager: Arc<TokenManagerPort>,
        clock: Arc<ClockPort>,
        slugger: Arc<dyn SlugGenerator>,
        policy: AllocationPolicy,
    ) -> Self {
        let snippet_slugs = Arc::new(SlugAllocator::new(
            EntityKind::Snippet,
            Arc::clone(&repos.slug_store),
            Arc::clone(&slugger),
            policy,
        ));
        let usernames = Arc::new(SlugAllocator::new(
            EntityKind::User,
            Arc::clone(&repos.slug_store),
            Arc::clone(&slugger),
            policy,
        ));

        let tag_normalizer = Normalizer::new(Arc::clone(&slugger));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            usernames,
            Arc::clone(&clock),
        ));

        let snippet_commands = Arc::new(SnippetCommandService::new(
            Arc::clone(&repos.snippet_writes),
            Arc::clone(&repos.snippet_reads),
            snippet_slugs,
            tag_normalizer.clone(),
            Arc::clone(&clock),
        ));

        let snippet_queries = Arc::new(SnippetQueryService::new(
            Arc::clone(&repos.snippet_reads),
            tag_normalizer,
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&repos.users), clock));

        Self {
            user_commands,
            snippet_commands,
            snippet_queries,
            user_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<TokenManagerPort> {
        Arc::clone(&self.token_manager)
    }

    /// Resolves a raw bearer token into the caller it was issued to.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
