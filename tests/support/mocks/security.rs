// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use snipshare::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use snipshare::domain::user::{Role, UserId};

/// Tokens are `<role>:<user id>:<username>`; the seeded users match these.
pub const ADMIN_TOKEN: &str = "admin:1:alice";
pub const MEMBER_TOKEN: &str = "member:2:bob";
pub const OTHER_TOKEN: &str = "member:3:carol";

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: format!(
                "{}:{}:{}",
                subject.role,
                i64::from(subject.user_id),
                subject.username
            ),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let invalid = || ApplicationError::unauthorized("invalid token");
        let mut parts = token.splitn(3, ':');
        let role: Role = parts
            .next()
            .and_then(|r| r.parse().ok())
            .ok_or_else(invalid)?;
        let id = parts
            .next()
            .and_then(|id| id.parse::<i64>().ok())
            .and_then(|id| UserId::new(id).ok())
            .ok_or_else(invalid)?;
        let username = parts.next().ok_or_else(invalid)?.to_string();

        let now = super::time::fixed_now();
        Ok(AuthenticatedUser {
            id,
            username,
            role,
            capabilities: role.default_capabilities(),
            issued_at: now,
            expires_at: now + Duration::hours(1),
        })
    }
}

/// Stores `hashed:<password>` and checks it verbatim.
#[derive(Clone, Debug, Default)]
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
