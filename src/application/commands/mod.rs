pub mod snippets;
pub mod users;

/// Upper bound on commits per write when a slug or username race is lost,
/// counting the first attempt.
pub const MAX_COMMIT_ATTEMPTS: u32 = 3;
