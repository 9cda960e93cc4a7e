use babelpress_data::{Filter, Page, Pageable, SortSpec, Values};
use babelpress_data_sqlx::{PgRepository, SqlxResult};
use sqlx::PgPool;

use crate::post::Post;

/// Parameters for one paginated listing call.
///
/// `page` is 1-indexed; `project_id` scopes the listing to one tenant and
/// is applied identically to the count and the data query.
#[derive(Debug, Clone, Copy)]
pub struct PostPageQuery {
    pub page: u64,
    pub page_size: u64,
    pub project_id: Option<i64>,
}

/// Post storage: generic CRUD via [`PgRepository`] plus the paginated
/// listing the serving layer is built around.
#[derive(Clone)]
pub struct PostRepository {
    repo: PgRepository<Post>,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: PgRepository::new(pool),
        }
    }

    /// The generic repository, for callers that need raw CRUD.
    pub fn inner(&self) -> &PgRepository<Post> {
        &self.repo
    }

    /// List posts newest-first with pagination metadata.
    ///
    /// The order is fixed at `created_at DESC`; this listing feeds the
    /// blog index pages and is not configurable. A `page` beyond the last
    /// one returns empty `data` with accurate totals; it is not an error.
    pub async fn find_many_paginated(&self, query: &PostPageQuery) -> SqlxResult<Page<Post>> {
        let pageable = Pageable::new(query.page, query.page_size);
        let filter = Filter::new().maybe_eq("project_id", query.project_id);
        let sort = SortSpec::new().desc("created_at");
        self.repo.find_page(&filter, &sort, &pageable).await
    }

    /// Look up one post by tenant and slug.
    pub async fn find_by_slug(&self, project_id: i64, slug: &str) -> SqlxResult<Option<Post>> {
        self.repo
            .find_one(&Filter::new().eq("project_id", project_id).eq("slug", slug))
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> SqlxResult<Option<Post>> {
        self.repo.find_one(&Filter::new().eq("id", id)).await
    }

    pub async fn create(&self, values: &Values) -> SqlxResult<Post> {
        self.repo.create(values).await
    }

    /// Move a post through the translation pipeline (`pending` →
    /// `translated`). The single write the translation job performs.
    pub async fn set_status(&self, id: i64, status: &str) -> SqlxResult<Post> {
        self.repo
            .update(
                &Filter::new().eq("id", id),
                &Values::new().set("status", status),
            )
            .await
    }

    pub async fn delete_by_id(&self, id: i64) -> SqlxResult<bool> {
        self.repo.delete(&Filter::new().eq("id", id)).await
    }

    pub async fn close(&self) {
        self.repo.close().await;
    }
}
