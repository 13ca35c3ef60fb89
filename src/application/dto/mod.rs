pub mod auth;
pub mod pagination;
pub mod serde_time;
pub mod snippets;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use pagination::{PageInfo, Paginated};
pub use snippets::{SnippetDto, TagDto, ViewCountDto};
pub use users::{CapabilityView, UserDto, UserProfileDto};
