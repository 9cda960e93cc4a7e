//! End-to-end scenarios against a real Postgres.
//!
//! Ignored by default; run with a database available:
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/babelpress_test \
//!     cargo test -p babelpress-blog -- --ignored --test-threads=1
//! ```
//!
//! The tests share one schema and truncate it, hence the single thread.

use babelpress_data::{DataError, Filter, SortSpec, Values};
use babelpress_data_sqlx::DbConfig;
use babelpress_blog::{PostPageQuery, PostRepository};
use serde_json::Value;
use sqlx::PgPool;

async fn test_pool() -> PgPool {
    DbConfig::from_env()
        .create_pool()
        .await
        .expect("DATABASE_URL must point at a reachable Postgres")
}

async fn reset_schema(pool: &PgPool) {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT NOT NULL,
            content TEXT,
            i18n JSONB NOT NULL DEFAULT '{}',
            status TEXT NOT NULL DEFAULT 'pending',
            project_id BIGINT NOT NULL,
            data JSONB NOT NULL DEFAULT '{}',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await
    .expect("create posts table");
    sqlx::query("TRUNCATE posts RESTART IDENTITY")
        .execute(pool)
        .await
        .expect("truncate posts");
}

/// 25 posts for project 1, then 5 for project 2, each one minute older
/// than the previous so newest-first order is deterministic. Project 1's
/// newest post is seq 0.
async fn seed_posts(pool: &PgPool) {
    for seq in 0..25 {
        insert_post(pool, 1, seq).await;
    }
    for seq in 0..5 {
        insert_post(pool, 2, 100 + seq).await;
    }
}

async fn insert_post(pool: &PgPool, project_id: i64, seq: i64) {
    sqlx::query(
        "INSERT INTO posts (title, slug, project_id, created_at)
         VALUES ($1, $2, $3, now() - make_interval(mins => $4::int))",
    )
    .bind(format!("post-{project_id}-{seq:03}"))
    .bind(format!("post-{project_id}-{seq:03}"))
    .bind(project_id)
    .bind(seq)
    .execute(pool)
    .await
    .expect("seed post");
}

#[tokio::test]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn paginated_listing_scenarios() {
    let pool = test_pool().await;
    reset_schema(&pool).await;
    seed_posts(&pool).await;
    let posts = PostRepository::new(pool.clone());

    // 25 posts for tenant 1: page 1 of size 10.
    let page1 = posts
        .find_many_paginated(&PostPageQuery {
            page: 1,
            page_size: 10,
            project_id: Some(1),
        })
        .await
        .unwrap();
    assert_eq!(page1.data.len(), 10);
    assert_eq!(page1.pagination.current_page, 1);
    assert_eq!(page1.pagination.total_pages, 3);
    assert_eq!(page1.pagination.total_items, 25);
    assert_eq!(page1.pagination.page_size, 10);
    assert!(page1.pagination.has_next_page);
    assert!(!page1.pagination.has_previous_page);
    assert_eq!(page1.data[0].title, "post-1-000");

    // Page 3 holds the remaining 5; offset must be 20, so the first row
    // is the 21st-newest post.
    let page3 = posts
        .find_many_paginated(&PostPageQuery {
            page: 3,
            page_size: 10,
            project_id: Some(1),
        })
        .await
        .unwrap();
    assert_eq!(page3.data.len(), 5);
    assert_eq!(page3.data[0].title, "post-1-020");
    assert!(!page3.pagination.has_next_page);
    assert!(page3.pagination.has_previous_page);

    // Beyond the last page: empty data, accurate totals, no error.
    let way_out = posts
        .find_many_paginated(&PostPageQuery {
            page: 8,
            page_size: 10,
            project_id: Some(1),
        })
        .await
        .unwrap();
    assert!(way_out.data.is_empty());
    assert_eq!(way_out.pagination.total_items, 25);
    assert_eq!(way_out.pagination.total_pages, 3);
    assert!(!way_out.pagination.has_next_page);

    // The other tenant sees only its own 5 posts.
    let other = posts
        .find_many_paginated(&PostPageQuery {
            page: 1,
            page_size: 10,
            project_id: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(other.pagination.total_items, 5);
    assert_eq!(other.pagination.total_pages, 1);

    // No tenant filter at all: both tenants' posts count.
    let unscoped = posts
        .find_many_paginated(&PostPageQuery {
            page: 1,
            page_size: 10,
            project_id: None,
        })
        .await
        .unwrap();
    assert_eq!(unscoped.pagination.total_items, 30);

    // An all-null filter must behave exactly like no filter.
    let repo = posts.inner();
    let with_null_filter = repo
        .find_many(
            &Filter::new().eq("status", Value::Null).eq("slug", Value::Null),
            &SortSpec::new(),
            None,
            None,
        )
        .await
        .unwrap();
    let without_filter = repo
        .find_many(&Filter::new(), &SortSpec::new(), None, None)
        .await
        .unwrap();
    assert_eq!(with_null_filter.len(), without_filter.len());

    posts.close().await;
}

#[tokio::test]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn crud_round_trip_and_guards() {
    let pool = test_pool().await;
    reset_schema(&pool).await;
    seed_posts(&pool).await;
    let posts = PostRepository::new(pool.clone());
    let repo = posts.inner();

    // create → findOne round trip: every field we wrote comes back.
    let created = posts
        .create(
            &Values::new()
                .set("title", "Fresh")
                .set("slug", "fresh")
                .set("project_id", 1)
                .set("status", "pending")
                .set("i18n", serde_json::json!({"de": {"title": "Frisch"}})),
        )
        .await
        .unwrap();
    let found = posts.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Fresh");
    assert_eq!(found.slug, "fresh");
    assert_eq!(found.project_id, 1);
    assert_eq!(found.status, "pending");
    assert_eq!(found.i18n, serde_json::json!({"de": {"title": "Frisch"}}));

    // update flips exactly one row's status.
    let updated = posts.set_status(7, "translated").await.unwrap();
    assert_eq!(updated.id, 7);
    assert_eq!(updated.status, "translated");
    let still_pending = repo
        .count(&Filter::new().eq("status", "pending").eq("project_id", 1))
        .await
        .unwrap();
    assert_eq!(still_pending, 25); // 24 seeded still pending + "Fresh"

    // update with no filter must fail and touch nothing.
    let before = repo.count(&Filter::new()).await.unwrap();
    let err = repo
        .update(&Filter::new(), &Values::new().set("status", "oops"))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Validation(_)));
    let oops = repo.count(&Filter::new().eq("status", "oops")).await.unwrap();
    assert_eq!(oops, 0);
    assert_eq!(repo.count(&Filter::new()).await.unwrap(), before);

    // update matching zero rows is NotFound, not Validation.
    let err = posts.set_status(999_999, "translated").await.unwrap_err();
    assert!(matches!(err, DataError::NotFound(_)));

    // delete removes the row and reports it.
    assert!(posts.delete_by_id(created.id).await.unwrap());
    assert!(!posts.delete_by_id(created.id).await.unwrap());
    assert!(posts.find_by_id(created.id).await.unwrap().is_none());

    // findOne on nothing is None, never an error.
    assert!(posts.find_by_slug(1, "no-such-slug").await.unwrap().is_none());

    posts.close().await;
}
