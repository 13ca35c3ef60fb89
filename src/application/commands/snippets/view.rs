// src/application/commands/snippets/view.rs
use super::SnippetCommandService;
use crate::{
    application::{
        dto::ViewCountDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::snippet::SnippetId,
};

pub struct RecordViewCommand {
    pub id: i64,
}

impl SnippetCommandService {
    pub async fn record_view(&self, command: RecordViewCommand) -> ApplicationResult<ViewCountDto> {
        let id = SnippetId::new(command.id)?;
        let views = self
            .write_repo
            .increment_view_count(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("snippet not found"))?;

        Ok(ViewCountDto {
            success: true,
            views,
        })
    }
}
