// src/application/commands/snippets/mod.rs
mod capability;
mod create;
mod delete;
mod service;
mod tags;
mod update;
mod view;

pub use create::{CreateSnippetCommand, CreateSnippetCommandBuilder};
pub use delete::DeleteSnippetCommand;
pub use service::SnippetCommandService;
pub use update::UpdateSnippetCommand;
pub use view::RecordViewCommand;
