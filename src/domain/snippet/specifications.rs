// src/domain/snippet/specifications.rs
use std::collections::HashSet;

use crate::domain::snippet::entity::Snippet;
use crate::domain::user::value_objects::{Capability, UserId};

pub trait SnippetSpecification {
    fn is_satisfied(&self) -> bool;
}

/// Owner with `<action>:own`, or anyone with `<action>:any`.
pub struct CanModifySnippetSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    snippet: &'a Snippet,
    user_id: UserId,
    action: &'static str,
}

impl<'a> CanModifySnippetSpec<'a> {
    pub fn update(
        capabilities: &'a HashSet<Capability>,
        snippet: &'a Snippet,
        user_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            snippet,
            user_id,
            action: "update",
        }
    }

    pub fn delete(
        capabilities: &'a HashSet<Capability>,
        snippet: &'a Snippet,
        user_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            snippet,
            user_id,
            action: "delete",
        }
    }

    fn has_capability(&self, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches("snippets", action))
    }
}

impl SnippetSpecification for CanModifySnippetSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.has_capability(&format!("{}:any", self.action))
            || (self.has_capability(&format!("{}:own", self.action))
                && self.snippet.author_id == self.user_id)
    }
}
