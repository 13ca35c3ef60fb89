// tests/support/builders.rs
use snipshare::application::commands::snippets::CreateSnippetCommand;

/// Valid create command with overridable fields.
pub struct SnippetBuilder {
    title: String,
    description: Option<String>,
    code: String,
    language: String,
    is_public: bool,
    tags: Vec<String>,
}

impl Default for SnippetBuilder {
    fn default() -> Self {
        Self {
            title: "Hello World".into(),
            description: None,
            code: "fn main() { println!(\"hello\"); }".into(),
            language: "rs".into(),
            is_public: true,
            tags: Vec::new(),
        }
    }
}

impl SnippetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn build(self) -> CreateSnippetCommand {
        let mut builder = CreateSnippetCommand::builder()
            .title(self.title)
            .code(self.code)
            .language(self.language)
            .is_public(self.is_public)
            .tags(self.tags);
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        builder.build().unwrap()
    }
}
