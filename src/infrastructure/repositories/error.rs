use crate::domain::errors::DomainError;

const CNT_SNIPPET_SLUG: &str = "snippets_slug_key";
const CNT_SNIPPET_AUTHOR: &str = "snippets_author_id_fkey";
const CNT_TAG_SLUG: &str = "tags_slug_key";
const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_USER_EMAIL: &str = "users_email_key";

/// Slug and username constraints surface as `SlugTaken` so callers can
/// re-allocate; other unique violations are plain conflicts.
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_SNIPPET_SLUG => DomainError::SlugTaken("snippet slug already exists".into()),
                    CNT_USER_USERNAME => DomainError::SlugTaken("username already exists".into()),
                    CNT_USER_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_TAG_SLUG => DomainError::Conflict("tag already exists".into()),
                    CNT_SNIPPET_AUTHOR => DomainError::NotFound("author not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
