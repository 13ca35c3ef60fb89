mod identity;
mod login;
mod password;
mod register;
mod service;

pub use identity::{IdentityResolution, ResolveExternalIdentityCommand};
pub use login::{LoginResult, LoginUserCommand};
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
