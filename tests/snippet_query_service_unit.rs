// tests/snippet_query_service_unit.rs
mod support;

use std::sync::Arc;

use snipshare::application::error::ApplicationError;
use snipshare::application::queries::snippets::{
    GetSnippetByIdQuery, GetSnippetBySlugQuery, ListSnippetsQuery,
};
use snipshare::application::services::ApplicationServices;
use snipshare::domain::slug::SlugError;
use support::{
    MEMBER_TOKEN, OTHER_TOKEN, SnippetBuilder, actor, build_services, seeded_store,
};

/// bob: two public rust snippets and one private; carol: one public python.
async fn populated() -> Arc<ApplicationServices> {
    let services = build_services(seeded_store().await);
    let bob = actor(&services, MEMBER_TOKEN).await;
    let carol = actor(&services, OTHER_TOKEN).await;

    for command in [
        SnippetBuilder::new()
            .title("Alpha iterator")
            .tags(&["iterators"])
            .build(),
        SnippetBuilder::new().title("Beta parser").code("fn parse() {}").build(),
        SnippetBuilder::new().title("Secret sauce").private().build(),
    ] {
        services
            .snippet_commands
            .create_snippet(&bob, command)
            .await
            .unwrap();
    }
    services
        .snippet_commands
        .create_snippet(
            &carol,
            SnippetBuilder::new()
                .title("Gamma script")
                .language("py")
                .code("print('parse me')")
                .build(),
        )
        .await
        .unwrap();

    services
}

fn titles(items: &[snipshare::application::dto::SnippetDto]) -> Vec<&str> {
    items.iter().map(|s| s.title.as_str()).collect()
}

#[tokio::test]
async fn anonymous_listing_sees_public_snippets_only() {
    let services = populated().await;

    let page = services
        .snippet_queries
        .list_snippets(None, ListSnippetsQuery::default())
        .await
        .unwrap();

    assert_eq!(page.pagination.total_count, 3);
    assert!(page.items.iter().all(|s| s.is_public));
}

#[tokio::test]
async fn authors_also_see_their_private_snippets() {
    let services = populated().await;
    let bob = actor(&services, MEMBER_TOKEN).await;
    let carol = actor(&services, OTHER_TOKEN).await;

    let for_bob = services
        .snippet_queries
        .list_snippets(Some(&bob), ListSnippetsQuery::default())
        .await
        .unwrap();
    assert_eq!(for_bob.pagination.total_count, 4);

    let for_carol = services
        .snippet_queries
        .list_snippets(Some(&carol), ListSnippetsQuery::default())
        .await
        .unwrap();
    assert_eq!(for_carol.pagination.total_count, 3);
}

#[tokio::test]
async fn private_filter_is_limited_to_the_caller() {
    let services = populated().await;
    let bob = actor(&services, MEMBER_TOKEN).await;

    let own = services
        .snippet_queries
        .list_snippets(
            Some(&bob),
            ListSnippetsQuery {
                is_public: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(titles(&own.items), ["Secret sauce"]);

    let err = services
        .snippet_queries
        .list_snippets(
            Some(&bob),
            ListSnippetsQuery {
                is_public: Some(false),
                author_id: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let err = services
        .snippet_queries
        .list_snippets(
            None,
            ListSnippetsQuery {
                is_public: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn filters_combine() {
    let services = populated().await;

    let python = services
        .snippet_queries
        .list_snippets(
            None,
            ListSnippetsQuery {
                language: Some("PY".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(titles(&python.items), ["Gamma script"]);

    let tagged = services
        .snippet_queries
        .list_snippets(
            None,
            ListSnippetsQuery {
                tag: Some("iterators".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(titles(&tagged.items), ["Alpha iterator"]);

    let search = services
        .snippet_queries
        .list_snippets(
            None,
            ListSnippetsQuery {
                search: Some("PARSE".into()),
                sort_by: Some("title".into()),
                sort_order: Some("asc".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(titles(&search.items), ["Beta parser", "Gamma script"]);

    let by_author = services
        .snippet_queries
        .list_snippets(
            None,
            ListSnippetsQuery {
                author_id: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_author.pagination.total_count, 2);
}

#[tokio::test]
async fn tag_filter_uses_the_same_normalization_as_tagging() {
    let services = populated().await;
    let bob = actor(&services, MEMBER_TOKEN).await;
    services
        .snippet_commands
        .create_snippet(
            &bob,
            SnippetBuilder::new().title("Delta templates").tags(&["C++"]).build(),
        )
        .await
        .unwrap();

    for raw in ["C++", "c", " C "] {
        let page = services
            .snippet_queries
            .list_snippets(
                None,
                ListSnippetsQuery {
                    tag: Some(raw.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(titles(&page.items), ["Delta templates"], "tag filter {raw:?}");
    }

    let err = services
        .snippet_queries
        .list_snippets(
            None,
            ListSnippetsQuery {
                tag: Some("+++".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Slug(SlugError::InvalidLabel { .. })));
}

#[tokio::test]
async fn pagination_reports_totals() {
    let services = populated().await;

    let page = services
        .snippet_queries
        .list_snippets(
            None,
            ListSnippetsQuery {
                page: Some(2),
                limit: Some(2),
                sort_by: Some("title".into()),
                sort_order: Some("asc".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(titles(&page.items), ["Gamma script"]);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.limit, 2);
    assert_eq!(page.pagination.total_count, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert!(!page.pagination.has_more);
}

#[tokio::test]
async fn out_of_range_paging_is_rejected() {
    let services = populated().await;

    for query in [
        ListSnippetsQuery {
            page: Some(0),
            ..Default::default()
        },
        ListSnippetsQuery {
            limit: Some(51),
            ..Default::default()
        },
        ListSnippetsQuery {
            sort_by: Some("author".into()),
            ..Default::default()
        },
    ] {
        let err = services
            .snippet_queries
            .list_snippets(None, query)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApplicationError::Validation(_) | ApplicationError::Domain(_)),
            "unexpected error: {err:?}"
        );
    }
}

#[tokio::test]
async fn private_snippet_lookups_differ_by_route() {
    let services = populated().await;
    let bob = actor(&services, MEMBER_TOKEN).await;
    let carol = actor(&services, OTHER_TOKEN).await;

    let by_slug = services
        .snippet_queries
        .get_snippet_by_slug(
            Some(&carol),
            GetSnippetBySlugQuery {
                slug: "secret-sauce".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(by_slug, ApplicationError::NotFound(_)));

    let own = services
        .snippet_queries
        .get_snippet_by_slug(
            Some(&bob),
            GetSnippetBySlugQuery {
                slug: "secret-sauce".into(),
            },
        )
        .await
        .unwrap();

    let by_id = services
        .snippet_queries
        .get_snippet_by_id(None, GetSnippetByIdQuery { id: own.id })
        .await
        .unwrap_err();
    assert!(matches!(by_id, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn malformed_slug_is_not_found() {
    let services = populated().await;

    let err = services
        .snippet_queries
        .get_snippet_by_slug(
            None,
            GetSnippetBySlugQuery {
                slug: "Not A Slug".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}
