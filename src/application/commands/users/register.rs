use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        user::{Email, NewUser, PasswordHash, Role, User, Username},
    },
};

pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserCommandService {
    /// The first account registered becomes the administrator.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;

        let existing = self.user_repo.count().await?;
        let role = if existing == 0 {
            Role::Admin
        } else {
            Role::Member
        };

        self.ensure_available(&username, &email).await?;

        let user = self
            .create_and_insert_user(username, email, &command.password, role)
            .await?;
        tracing::info!(user_id = user.id.0, role = %user.role, "user registered");

        Ok(user.into())
    }

    async fn ensure_available(&self, username: &Username, email: &Email) -> ApplicationResult<()> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(ApplicationError::conflict("email already registered"));
        }
        Ok(())
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        email: Email,
        password: &str,
        role: Role,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user =
            NewUser::with_credentials(username, email, password_hash, role, self.clock.now());
        match self.user_repo.insert(new_user).await {
            Ok(user) => Ok(user),
            Err(DomainError::SlugTaken(_)) => {
                Err(ApplicationError::conflict("username already exists"))
            }
            Err(err) => Err(err.into()),
        }
    }
}
