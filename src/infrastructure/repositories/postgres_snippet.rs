// src/infrastructure/repositories/postgres_snippet.rs
use std::collections::HashMap;

use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use crate::domain::snippet::{
    Language, NewSnippet, NewTag, PageRequest, Snippet, SnippetCode, SnippetDescription,
    SnippetFilter, SnippetId, SnippetReadRepository, SnippetTitle, SnippetUpdate,
    SnippetWriteRepository, Tag, TagId, TagName, Visibility,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};

const SNIPPET_COLUMNS: &str = "id, title, slug, description, code, language, is_public, view_count, author_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresSnippetWriteRepository {
    pool: PgPool,
}

impl PostgresSnippetWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresSnippetReadRepository {
    pool: PgPool,
}

impl PostgresSnippetReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SnippetRow {
    id: i64,
    title: String,
    slug: String,
    description: Option<String>,
    code: String,
    language: String,
    is_public: bool,
    view_count: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SnippetRow {
    fn into_snippet(self, tags: Vec<Tag>) -> DomainResult<Snippet> {
        Ok(Snippet {
            id: SnippetId::new(self.id)?,
            title: SnippetTitle::new(self.title)?,
            slug: Slug::new(self.slug)?,
            description: self
                .description
                .map(SnippetDescription::parse)
                .transpose()?
                .flatten(),
            code: SnippetCode::new(self.code)?,
            language: Language::new(self.language)?,
            is_public: self.is_public,
            view_count: self.view_count,
            author_id: UserId::new(self.author_id)?,
            tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct SnippetTagRow {
    snippet_id: i64,
    id: i64,
    name: String,
    slug: String,
}

impl TryFrom<SnippetTagRow> for Tag {
    type Error = DomainError;

    fn try_from(row: SnippetTagRow) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: TagId(row.id),
            name: TagName::new(row.name)?,
            slug: Slug::new(row.slug)?,
        })
    }
}

async fn load_tags<'e, E>(executor: E, ids: &[i64]) -> DomainResult<HashMap<i64, Vec<Tag>>>
where
    E: sqlx::PgExecutor<'e>,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, SnippetTagRow>(
        "SELECT st.snippet_id, t.id, t.name, t.slug
         FROM snippet_tags st JOIN tags t ON t.id = st.tag_id
         WHERE st.snippet_id = ANY($1)
         ORDER BY t.name",
    )
    .bind(ids)
    .fetch_all(executor)
    .await
    .map_err(map_sqlx)?;

    let mut grouped: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in rows {
        let snippet_id = row.snippet_id;
        grouped.entry(snippet_id).or_default().push(Tag::try_from(row)?);
    }
    Ok(grouped)
}

/// Creates missing tags and links them to `snippet_id`, all inside `tx`.
async fn attach_tags(
    tx: &mut Transaction<'_, Postgres>,
    snippet_id: i64,
    tags: &[NewTag],
) -> DomainResult<()> {
    for tag in tags {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let tag_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO tags (name, slug) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT tags_slug_key DO UPDATE SET slug = EXCLUDED.slug
             RETURNING id",
        )
        .bind(tag.name.as_str())
        .bind(tag.slug.as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO snippet_tags (snippet_id, tag_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(snippet_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;
    }
    Ok(())
}

async fn hydrate(
    tx: &mut Transaction<'_, Postgres>,
    row: SnippetRow,
) -> DomainResult<Snippet> {
    let mut tags = load_tags(&mut **tx, &[row.id]).await?;
    let own = tags.remove(&row.id).unwrap_or_default();
    row.into_snippet(own)
}

#[async_trait]
impl SnippetWriteRepository for PostgresSnippetWriteRepository {
    async fn insert(&self, snippet: NewSnippet) -> DomainResult<Snippet> {
        let NewSnippet {
            title,
            slug,
            description,
            code,
            language,
            is_public,
            author_id,
            tags,
            created_at,
            updated_at,
        } = snippet;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            "INSERT INTO snippets (title, slug, description, code, language, is_public, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {SNIPPET_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(description.as_ref().map(SnippetDescription::as_str))
        .bind(code.as_str())
        .bind(language.as_str())
        .bind(is_public)
        .bind(i64::from(author_id))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        attach_tags(&mut tx, row.id, &tags).await?;
        let created = hydrate(&mut tx, row).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(created)
    }

    async fn update(&self, update: SnippetUpdate) -> DomainResult<Snippet> {
        let SnippetUpdate {
            id,
            title,
            slug,
            description,
            code,
            language,
            is_public,
            tags,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE snippets SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description.map(SnippetDescription::into_inner));
        }
        if let Some(code) = code {
            builder.push(", code = ");
            builder.push_bind(code.into_inner());
        }
        if let Some(language) = language {
            builder.push(", language = ");
            builder.push_bind(language.into_inner());
        }
        if let Some(is_public) = is_public {
            builder.push(", is_public = ");
            builder.push_bind(is_public);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING ");
        builder.push(SNIPPET_COLUMNS);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = builder
            .build_query_as::<SnippetRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("snippet not found".into()))?;

        if let Some(tags) = tags {
            sqlx::query("DELETE FROM snippet_tags WHERE snippet_id = $1")
                .bind(row.id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            attach_tags(&mut tx, row.id, &tags).await?;
        }

        let updated = hydrate(&mut tx, row).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(updated)
    }

    async fn delete(&self, id: SnippetId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("snippet not found".into()));
        }
        Ok(())
    }

    async fn increment_view_count(&self, id: SnippetId) -> DomainResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE snippets SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

impl PostgresSnippetReadRepository {
    fn apply_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &SnippetFilter) {
        let mut has_where = false;

        match filter.visibility {
            Visibility::PublicOnly => {
                push_clause(builder, &mut has_where);
                builder.push("is_public = TRUE");
            }
            Visibility::PublicOrOwnedBy(user) => {
                push_clause(builder, &mut has_where);
                builder.push("(is_public = TRUE OR author_id = ");
                builder.push_bind(i64::from(user));
                builder.push(")");
            }
            Visibility::Exactly(flag) => {
                push_clause(builder, &mut has_where);
                builder.push("is_public = ");
                builder.push_bind(flag);
            }
        }

        if let Some(language) = &filter.language {
            push_clause(builder, &mut has_where);
            builder.push("LOWER(language) = LOWER(");
            builder.push_bind(language.clone());
            builder.push(")");
        }

        if let Some(author) = filter.author_id {
            push_clause(builder, &mut has_where);
            builder.push("author_id = ");
            builder.push_bind(i64::from(author));
        }

        if let Some(tag) = &filter.tag {
            push_clause(builder, &mut has_where);
            builder.push(
                "EXISTS (SELECT 1 FROM snippet_tags st JOIN tags t ON t.id = st.tag_id
                 WHERE st.snippet_id = snippets.id AND t.slug = ",
            );
            builder.push_bind(tag.as_str().to_owned());
            builder.push(")");
        }

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", escape_like(search));
            push_clause(builder, &mut has_where);
            builder.push("(title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR code ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    builder.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl SnippetReadRepository for PostgresSnippetReadRepository {
    async fn find_by_id(&self, id: SnippetId) -> DomainResult<Option<Snippet>> {
        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.with_tags(row).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Snippet>> {
        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.with_tags(row).await
    }

    async fn list_page(
        &self,
        filter: &SnippetFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<Snippet>, u64)> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM snippets");
        Self::apply_conditions(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(SNIPPET_COLUMNS);
        builder.push(" FROM snippets");
        Self::apply_conditions(&mut builder, filter);
        builder.push(format!(
            " ORDER BY {col} {dir}, id {dir}",
            col = filter.sort_by.column(),
            dir = filter.sort_order.keyword()
        ));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(page.limit));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset() as i64);

        let rows = builder
            .build_query_as::<SnippetRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut tags = load_tags(&self.pool, &ids).await?;
        let snippets = rows
            .into_iter()
            .map(|row| {
                let own = tags.remove(&row.id).unwrap_or_default();
                row.into_snippet(own)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok((snippets, total.max(0) as u64))
    }
}

impl PostgresSnippetReadRepository {
    async fn with_tags(&self, row: Option<SnippetRow>) -> DomainResult<Option<Snippet>> {
        let Some(row) = row else {
            return Ok(None);
        };
        let mut tags = load_tags(&self.pool, &[row.id]).await?;
        let own = tags.remove(&row.id).unwrap_or_default();
        row.into_snippet(own).map(Some)
    }
}
