use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, TokenSubject, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, User},
};

pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let email =
            Email::new(command.email).map_err(|_| ApplicationError::unauthorized("invalid credentials"))?;
        let user = self
            .find_and_authenticate_user(&email, &command.password)
            .await?;

        let token = self.issue_token(&user).await?;
        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    pub(super) async fn issue_token(&self, user: &User) -> ApplicationResult<AuthTokenDto> {
        let subject = TokenSubject {
            user_id: user.id,
            username: user.username.to_string(),
            role: user.role,
            capabilities: user.role.default_capabilities(),
        };
        self.token_manager.issue(subject).await
    }

    async fn find_and_authenticate_user(
        &self,
        email: &Email,
        password: &str,
    ) -> ApplicationResult<User> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid credentials"))?;

        let Some(hash) = user.password_hash.as_ref() else {
            return Err(ApplicationError::unauthorized("invalid credentials"));
        };

        self.password_hasher
            .verify(password, hash.as_str())
            .await
            .map_err(|err| match err {
                ApplicationError::Unauthorized(_) => {
                    ApplicationError::unauthorized("invalid credentials")
                }
                other => other,
            })?;

        Ok(user)
    }
}
