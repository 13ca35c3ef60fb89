// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, Role, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    /// `None` for accounts created through an external identity.
    pub password_hash: Option<PasswordHash>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.username.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub password_hash: Option<PasswordHash>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn with_credentials(
        username: Username,
        email: Email,
        password_hash: PasswordHash,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            display_name: None,
            avatar_url: None,
            password_hash: Some(password_hash),
            role,
            created_at,
        }
    }

    pub fn with_username(mut self, username: Username) -> Self {
        self.username = username;
        self
    }
}
