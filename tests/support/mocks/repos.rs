// tests/support/mocks/repos.rs
use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use snipshare::domain::errors::{DomainError, DomainResult};
use snipshare::domain::slug::{EntityKind, OwnerRef, Slug, SlugStore};
use snipshare::domain::snippet::{
    NewSnippet, NewTag, PageRequest, Snippet, SnippetFilter, SnippetId, SnippetReadRepository,
    SnippetUpdate, SnippetWriteRepository, SortField, SortOrder, Tag, TagId, Visibility,
};
use snipshare::domain::user::{Email, NewUser, User, UserId, UserRepository, Username};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    snippets: Vec<Snippet>,
    tags: Vec<Tag>,
    next_snippet_id: i64,
}

/// One in-memory database behind every repository port, with the same unique
/// constraints as the migrations.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn snippet_count(&self) -> usize {
        self.tables.lock().unwrap().snippets.len()
    }

    pub fn snippet_slugs(&self) -> Vec<String> {
        self.tables
            .lock()
            .unwrap()
            .snippets
            .iter()
            .map(|s| s.slug.to_string())
            .collect()
    }

    pub fn tag_slugs(&self) -> Vec<String> {
        self.tables
            .lock()
            .unwrap()
            .tags
            .iter()
            .map(|t| t.slug.to_string())
            .collect()
    }
}

/// Find-or-create by slug; only called once the snippet write is accepted.
fn upsert_tags(tables: &mut Tables, tags: &[NewTag]) -> Vec<Tag> {
    tags.iter()
        .map(|new_tag| {
            if let Some(tag) = tables.tags.iter().find(|t| t.slug == new_tag.slug) {
                return tag.clone();
            }
            let tag = Tag {
                id: TagId(tables.tags.len() as i64 + 1),
                name: new_tag.name.clone(),
                slug: new_tag.slug.clone(),
            };
            tables.tags.push(tag.clone());
            tag
        })
        .collect()
}

fn matches(filter: &SnippetFilter, snippet: &Snippet) -> bool {
    let visible = match filter.visibility {
        Visibility::PublicOnly => snippet.is_public,
        Visibility::PublicOrOwnedBy(user) => snippet.is_public || snippet.author_id == user,
        Visibility::Exactly(is_public) => snippet.is_public == is_public,
    };
    if !visible {
        return false;
    }
    if let Some(language) = &filter.language {
        if !snippet.language.as_str().eq_ignore_ascii_case(language) {
            return false;
        }
    }
    if let Some(tag) = &filter.tag {
        if !snippet.tags.iter().any(|t| &t.slug == tag) {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let hit = snippet.title.as_str().to_lowercase().contains(&needle)
            || snippet
                .description
                .as_ref()
                .is_some_and(|d| d.as_str().to_lowercase().contains(&needle))
            || snippet.code.as_str().to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    if let Some(author) = filter.author_id {
        if snippet.author_id != author {
            return false;
        }
    }
    true
}

fn compare(field: SortField, a: &Snippet, b: &Snippet) -> Ordering {
    let primary = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::ViewCount => a.view_count.cmp(&b.view_count),
        SortField::Title => a.title.as_str().cmp(b.title.as_str()),
    };
    primary.then(a.id.0.cmp(&b.id.0))
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.tables.lock().unwrap().users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::SlugTaken(new_user.username.to_string()));
        }
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email already exists".into()));
        }
        let user = User {
            id: UserId(tables.users.len() as i64 + 1),
            username: new_user.username,
            email: new_user.email,
            display_name: new_user.display_name,
            avatar_url: new_user.avatar_url,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: new_user.created_at,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl SnippetWriteRepository for InMemoryStore {
    async fn insert(&self, snippet: NewSnippet) -> DomainResult<Snippet> {
        let mut tables = self.tables.lock().unwrap();
        if tables.snippets.iter().any(|s| s.slug == snippet.slug) {
            return Err(DomainError::SlugTaken(snippet.slug.to_string()));
        }
        tables.next_snippet_id += 1;
        let created = Snippet {
            id: SnippetId(tables.next_snippet_id),
            tags: upsert_tags(&mut tables, &snippet.tags),
            title: snippet.title,
            slug: snippet.slug,
            description: snippet.description,
            code: snippet.code,
            language: snippet.language,
            is_public: snippet.is_public,
            view_count: 0,
            author_id: snippet.author_id,
            created_at: snippet.created_at,
            updated_at: snippet.updated_at,
        };
        tables.snippets.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: SnippetUpdate) -> DomainResult<Snippet> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(slug) = &update.slug {
            if tables
                .snippets
                .iter()
                .any(|s| &s.slug == slug && s.id != update.id)
            {
                return Err(DomainError::SlugTaken(slug.to_string()));
            }
        }
        if !tables.snippets.iter().any(|s| s.id == update.id) {
            return Err(DomainError::NotFound("snippet not found".into()));
        }
        let tags = update.tags.as_ref().map(|tags| upsert_tags(&mut tables, tags));
        let snippet = tables
            .snippets
            .iter_mut()
            .find(|s| s.id == update.id)
            .ok_or_else(|| DomainError::NotFound("snippet not found".into()))?;

        if let Some(title) = update.title {
            snippet.title = title;
        }
        if let Some(slug) = update.slug {
            snippet.slug = slug;
        }
        if let Some(description) = update.description {
            snippet.description = description;
        }
        if let Some(code) = update.code {
            snippet.code = code;
        }
        if let Some(language) = update.language {
            snippet.language = language;
        }
        if let Some(is_public) = update.is_public {
            snippet.is_public = is_public;
        }
        if let Some(tags) = tags {
            snippet.tags = tags;
        }
        snippet.updated_at = update.updated_at;
        Ok(snippet.clone())
    }

    async fn delete(&self, id: SnippetId) -> DomainResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.snippets.len();
        tables.snippets.retain(|s| s.id != id);
        if tables.snippets.len() == before {
            return Err(DomainError::NotFound("snippet not found".into()));
        }
        Ok(())
    }

    async fn increment_view_count(&self, id: SnippetId) -> DomainResult<Option<i64>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.snippets.iter_mut().find(|s| s.id == id).map(|s| {
            s.view_count += 1;
            s.view_count
        }))
    }
}

#[async_trait]
impl SnippetReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: SnippetId) -> DomainResult<Option<Snippet>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.snippets.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Snippet>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.snippets.iter().find(|s| &s.slug == slug).cloned())
    }

    async fn list_page(
        &self,
        filter: &SnippetFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<Snippet>, u64)> {
        let tables = self.tables.lock().unwrap();
        let mut hits: Vec<Snippet> = tables
            .snippets
            .iter()
            .filter(|s| matches(filter, s))
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            let ord = compare(filter.sort_by, a, b);
            match filter.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        let total = hits.len() as u64;
        let items = hits
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((items, total))
    }
}

#[async_trait]
impl SlugStore for InMemoryStore {
    async fn exists_by_token(
        &self,
        kind: EntityKind,
        token: &Slug,
        exclude_owner: Option<OwnerRef>,
    ) -> DomainResult<bool> {
        let tables = self.tables.lock().unwrap();
        let excluded = exclude_owner.map(i64::from);
        Ok(match kind {
            EntityKind::Snippet => tables
                .snippets
                .iter()
                .any(|s| &s.slug == token && Some(s.id.0) != excluded),
            EntityKind::User => tables
                .users
                .iter()
                .any(|u| u.username.as_str() == token.as_str() && Some(u.id.0) != excluded),
        })
    }
}
