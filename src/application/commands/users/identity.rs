// src/application/commands/users/identity.rs
use super::UserCommandService;
use crate::{
    application::{
        commands::MAX_COMMIT_ATTEMPTS,
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        slug::SlugError,
        user::{Email, NewUser, Role, User, Username},
    },
};

const FALLBACK_HANDLE: &str = "user";
const HANDLE_BASE_MAX: usize = 20;

/// A verified e-mail handed over by an external identity provider.
pub struct ResolveExternalIdentityCommand {
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug)]
pub struct IdentityResolution {
    pub user: UserDto,
    pub created: bool,
}

impl UserCommandService {
    /// Returns the account owning `email`, creating one on first sight with a
    /// username derived from the e-mail local part.
    pub async fn resolve_external_identity(
        &self,
        command: ResolveExternalIdentityCommand,
    ) -> ApplicationResult<IdentityResolution> {
        let email = Email::new(command.email)?;
        if let Some(user) = self.user_repo.find_by_email(&email).await? {
            return Ok(IdentityResolution {
                user: user.into(),
                created: false,
            });
        }

        let role = if self.user_repo.count().await? == 0 {
            Role::Admin
        } else {
            Role::Member
        };
        let base = self.username_base(&email)?;

        let mut attempt = 1;
        loop {
            let username = self.allocate_username(&base).await?;
            let new_user = NewUser {
                username,
                email: email.clone(),
                display_name: command.display_name.clone(),
                avatar_url: command.avatar_url.clone(),
                password_hash: None,
                role,
                created_at: self.clock.now(),
            };

            match self.user_repo.insert(new_user).await {
                Ok(user) => {
                    tracing::info!(user_id = user.id.0, username = %user.username, "external identity linked");
                    return Ok(IdentityResolution {
                        user: user.into(),
                        created: true,
                    });
                }
                Err(DomainError::SlugTaken(taken)) if attempt < MAX_COMMIT_ATTEMPTS => {
                    tracing::warn!(username = %taken, attempt, "username commit lost a race; re-allocating");
                    attempt += 1;
                }
                Err(DomainError::Conflict(_)) => return self.existing_by_email(&email).await,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Normalized local part, clipped so suffixed candidates stay within
    /// the username length limit.
    fn username_base(&self, email: &Email) -> ApplicationResult<String> {
        let normalized = match self.usernames.normalize(email.local_part()) {
            Ok(slug) => slug.into_inner(),
            Err(SlugError::InvalidLabel { .. }) => FALLBACK_HANDLE.to_string(),
            Err(err) => return Err(err.into()),
        };

        let mut base: String = normalized.chars().take(HANDLE_BASE_MAX).collect();
        while base.ends_with('-') {
            base.pop();
        }
        if base.len() < 3 {
            base = format!("{base}-{FALLBACK_HANDLE}");
        }
        Ok(base)
    }

    async fn allocate_username(&self, base: &str) -> ApplicationResult<Username> {
        let slug = self.usernames.allocate(base, None).await?;
        Ok(Username::new(slug.into_inner())?)
    }

    async fn existing_by_email(&self, email: &Email) -> ApplicationResult<IdentityResolution> {
        let user: User = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApplicationError::conflict("email already registered"))?;
        Ok(IdentityResolution {
            user: user.into(),
            created: false,
        })
    }
}
